// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::models::User;
use crate::services::SessionManager;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "albergue_sid";

/// Reason shown on the login page after a guarded redirect.
pub const LOGIN_REQUIRED: &str = "Debes iniciar sesión primero";

/// Authenticated user extracted from the session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Arc<User>);

/// The request carried no live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Authentication required")]
pub struct Unauthenticated;

/// Resolve the session token, if any, to its user.
pub fn require_session(
    sessions: &SessionManager,
    token: Option<&str>,
) -> Result<Arc<User>, Unauthenticated> {
    token
        .and_then(|token| sessions.get(token))
        .ok_or(Unauthenticated)
}

/// The user behind the request's session cookie, for public pages that only
/// personalise.
pub fn session_user(state: &AppState, jar: &CookieJar) -> Option<Arc<User>> {
    require_session(&state.sessions, jar.get(SESSION_COOKIE).map(Cookie::value)).ok()
}

/// Middleware that requires a live session.
///
/// Without one the request never reaches the handler; the browser is sent
/// to the login page with a reason. With one, the cookie is sent again so
/// its `Max-Age` slides along with the server-side expiry.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());

    match (require_session(&state.sessions, token.as_deref()), token) {
        (Ok(user), Some(token)) => {
            request.extensions_mut().insert(CurrentUser(user));
            let response = next.run(request).await;
            (jar.add(session_cookie(token, &state)), response).into_response()
        }
        _ => {
            tracing::debug!(
                path = %request.uri().path(),
                "Unauthenticated request redirected to login"
            );
            login_redirect(LOGIN_REQUIRED).into_response()
        }
    }
}

/// Redirect to the login page carrying a human-readable reason.
pub fn login_redirect(reason: &str) -> Redirect {
    Redirect::to(&format!("/login?error={}", urlencoding::encode(reason)))
}

/// Build the session cookie.
pub fn session_cookie(token: String, state: &AppState) -> Cookie<'static> {
    let max_age = time::Duration::try_from(state.sessions.ttl()).unwrap_or(time::Duration::DAY);

    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(max_age)
        .build()
}

/// Cookie that clears the session cookie (same path as creation).
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
