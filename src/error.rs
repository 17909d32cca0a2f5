// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent HTML responses.
//!
//! Handlers that own a form or a page recover from their own failures and
//! re-render. Anything that escapes ends up here and becomes a generic page:
//! diagnostics go to the log, never to the client.

use crate::db::DataAccessError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DataAccess(#[from] DataAccessError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

const SERVER_ERROR_PAGE: &str = "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
<title>Error del servidor</title></head><body><h1>Error del servidor</h1>\
<p>Intenta más tarde.</p></body></html>";

impl AppError {
    /// Status code the client sees for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DataAccess(DataAccessError::PoolExhausted) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DataAccess(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::DataAccess(err) => tracing::error!(error = %err, "Database error"),
            AppError::Internal(err) => tracing::error!(error = %err, "Internal server error"),
        }

        (status, Html(SERVER_ERROR_PAGE)).into_response()
    }
}
