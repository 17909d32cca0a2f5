// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Informational pages and empty form shells.

use crate::middleware::auth::session_user;
use crate::middleware::CurrentUser;
use crate::views::{templates, View};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Redirect, Response},
    routing::get,
    Extension, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Map;
use std::sync::Arc;

/// Pages anyone can see.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/bienvenido") }))
        .route("/bienvenido", get(welcome))
}

/// Pages behind the session guard (applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/menu", get(menu))
        .route("/acerca_del_albergue", get(about))
        .route("/infoAdopciones", get(adoption_info))
        .route("/infoDonaciones", get(donation_info))
        .route("/infoReportes", get(report_info))
        .route("/FormularioReportes", get(report_form))
        .route("/FormularioDonaciones", get(donation_form))
}

async fn welcome(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let user = session_user(&state, &jar);
    state.render(
        StatusCode::OK,
        View::new(templates::WELCOME, "Bienvenido").user(user.as_deref()),
    )
}

fn info_page(
    state: &AppState,
    user: &CurrentUser,
    template: &'static str,
    title: &str,
) -> Response {
    state.render(
        StatusCode::OK,
        View::new(template, title).user(Some(user.0.as_ref())),
    )
}

async fn menu(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    info_page(&state, &user, templates::MENU, "Menú Principal")
}

async fn about(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    info_page(&state, &user, templates::ABOUT, "Acerca del Albergue")
}

async fn adoption_info(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    info_page(&state, &user, templates::ADOPTION_INFO, "Información sobre Adopciones")
}

async fn donation_info(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    info_page(&state, &user, templates::DONATION_INFO, "Información sobre Donaciones")
}

async fn report_info(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    info_page(&state, &user, templates::REPORT_INFO, "Información sobre Reportes")
}

/// Empty form: no message, no prefilled values.
fn form_shell(
    state: &AppState,
    user: &CurrentUser,
    template: &'static str,
    title: &str,
) -> Response {
    state.render(
        StatusCode::OK,
        View::new(template, title)
            .user(Some(user.0.as_ref()))
            .with("error", None::<String>)
            .with("success", None::<String>)
            .with("formData", Map::new()),
    )
}

async fn report_form(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    form_shell(&state, &user, templates::REPORT_FORM, "Formulario de Reportes")
}

async fn donation_form(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    form_shell(&state, &user, templates::DONATION_FORM, "Formulario de Donaciones")
}
