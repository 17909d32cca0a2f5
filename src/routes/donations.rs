// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Donation form submission.

use crate::middleware::CurrentUser;
use crate::services::DonationForm;
use crate::views::{templates, View};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::post,
    Extension, Form, Router,
};
use serde_json::Map;
use std::sync::Arc;

const TITLE: &str = "Formulario de Donaciones";

/// Donation routes (the session guard is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/donaciones/guardar", post(save_donation))
}

/// Record a donation and show the form again: empty with a thank-you on
/// success, refilled with the error otherwise.
async fn save_donation(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<DonationForm>,
) -> Response {
    let view = View::new(templates::DONATION_FORM, TITLE).user(Some(user.as_ref()));

    match state.donations.record(&form, user.id).await {
        Ok(donation) => state.render(
            StatusCode::OK,
            view.with("error", None::<String>)
                .with("success", "Donación guardada con éxito. ¡Gracias!")
                .with("donacion", &donation)
                .with("formData", Map::new()),
        ),
        Err(e) => {
            let status = if e.is_validation() {
                tracing::info!(user_id = user.id, reason = %e, "Donation rejected");
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                tracing::error!(user_id = user.id, error = %e, "Donation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            };

            state.render(
                status,
                view.with("error", e.user_message())
                    .with("success", None::<String>)
                    .with("formData", &form),
            )
        }
    }
}
