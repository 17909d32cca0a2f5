// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration and logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::middleware::auth::{expired_session_cookie, session_cookie, SESSION_COOKIE};
use crate::models::User;
use crate::services::{AccountError, RegistrationForm};
use crate::views::{templates, View};
use crate::AppState;

const MISSING_FIELDS: &str = "Por favor, completa todos los campos.";
const BAD_CREDENTIALS: &str = "Usuario no registrado o contraseña incorrecta.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/registro", get(register_page).post(register))
        .route("/logout", get(logout))
}

/// Messages carried to the login page in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageParams {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    success: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    correo: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

fn login_view(error: Option<&str>, success: Option<&str>, correo: Option<&str>) -> View {
    View::new(templates::LOGIN, "Login")
        .with("error", error)
        .with("success", success)
        .with("correo", correo)
}

async fn login_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoginPageParams>,
) -> Response {
    state.render(
        StatusCode::OK,
        login_view(params.error.as_deref(), params.success.as_deref(), None),
    )
}

/// Verify credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let correo = form.correo.filter(|c| !c.trim().is_empty());
    let password = form.password.filter(|p| !p.is_empty());

    let (Some(correo), Some(password)) = (correo, password) else {
        return state.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            login_view(Some(MISSING_FIELDS), None, None),
        );
    };

    match state.accounts.authenticate(&correo, &password).await {
        Ok(Some(user)) => {
            tracing::info!(user_id = user.id, "User logged in");
            start_session(&state, jar, user)
        }
        Ok(None) => state.render(
            StatusCode::UNAUTHORIZED,
            login_view(Some(BAD_CREDENTIALS), None, Some(&correo)),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            state.render(
                StatusCode::INTERNAL_SERVER_ERROR,
                login_view(Some("Error del servidor. Intenta más tarde."), None, Some(&correo)),
            )
        }
    }
}

fn register_view(error: Option<&str>, form: &RegistrationForm) -> View {
    View::new(templates::REGISTER, "Registro")
        .with("error", error)
        .with("formData", form)
}

async fn register_page(State(state): State<Arc<AppState>>) -> Response {
    state.render(
        StatusCode::OK,
        register_view(None, &RegistrationForm::default()),
    )
}

/// Create the account and log the new user in.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegistrationForm>,
) -> Response {
    match state.accounts.register(&form).await {
        Ok(user) => start_session(&state, jar, user),
        Err(AccountError::Validation(missing)) => state.render(
            StatusCode::UNPROCESSABLE_ENTITY,
            register_view(Some(MISSING_FIELDS), &form).with("missing", missing),
        ),
        Err(AccountError::DuplicateEmail) => state.render(
            StatusCode::CONFLICT,
            register_view(Some("Este correo ya está registrado."), &form),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            state.render(
                StatusCode::INTERNAL_SERVER_ERROR,
                register_view(Some("Error en el servidor. Inténtalo más tarde."), &form),
            )
        }
    }
}

/// Replace any existing session with a fresh one and go to the menu.
fn start_session(state: &AppState, jar: CookieJar, user: User) -> Response {
    if let Some(previous) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(previous.value());
    }

    match state.sessions.create(user) {
        Ok(token) => {
            let jar = jar.add(session_cookie(token, state));
            (jar, Redirect::to("/menu")).into_response()
        }
        Err(e) => AppError::Internal(e.into()).into_response(),
    }
}

/// End the session and return to the login page.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value());
    }

    let jar = jar.remove(expired_session_cookie());
    (jar, Redirect::to("/login")).into_response()
}
