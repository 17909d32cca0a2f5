// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dog catalogue pages.

use crate::middleware::CurrentUser;
use crate::models::Dog;
use crate::services::DogLookupError;
use crate::views::{templates, View};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

/// Dog routes (the session guard is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/perros", get(list_dogs))
        .route("/perros/{id}", get(dog_detail))
}

/// List every dog. A database failure still renders the page, empty and
/// with an error message.
async fn list_dogs(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Response {
    let listing = state.dogs.list().await;

    let (status, error) = if listing.failed {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("No se pudieron cargar los perros."),
        )
    } else {
        (StatusCode::OK, None)
    };

    state.render(
        status,
        View::new(templates::DOGS, "Nuestros Perros")
            .user(Some(user.as_ref()))
            .with("perros", &listing.perros)
            .with("error", error),
    )
}

async fn dog_detail(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Response {
    match state.dogs.get(&id).await {
        Ok(perro) => state.render(
            StatusCode::OK,
            View::new(templates::DOG_DETAIL, format!("Detalles de {}", perro.nombre))
                .user(Some(user.as_ref()))
                .with("perro", &perro)
                .with("error", None::<String>),
        ),
        Err(DogLookupError::NotFound) => state.render(
            StatusCode::NOT_FOUND,
            View::new(templates::NOT_FOUND, "Perro no encontrado").user(Some(user.as_ref())),
        ),
        Err(DogLookupError::DataAccess(e)) => {
            tracing::error!(error = %e, dog_id = %id, "Failed to load dog");
            state.render(
                StatusCode::INTERNAL_SERVER_ERROR,
                View::new(templates::DOG_DETAIL, "Error al cargar detalles")
                    .user(Some(user.as_ref()))
                    .with("perro", None::<Dog>)
                    .with("error", "No se pudieron cargar los detalles."),
            )
        }
    }
}
