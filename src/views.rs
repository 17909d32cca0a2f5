// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation adapter.
//!
//! Handlers describe *what* to show as a [`View`]: a template name, a title
//! and a JSON payload. A [`Presenter`] turns that into a page. The default
//! [`ShellPresenter`] emits an HTML shell that embeds the payload for the
//! page script of the same name under `/static`.

use crate::error::AppError;
use crate::models::User;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// Template names.
pub mod templates {
    pub const WELCOME: &str = "Bienvenido";
    pub const LOGIN: &str = "Login";
    pub const REGISTER: &str = "crearCuenta";
    pub const MENU: &str = "Menu";
    pub const ABOUT: &str = "AcercaDelAlbergue";
    pub const ADOPTION_INFO: &str = "InfoAdopciones";
    pub const DONATION_INFO: &str = "InfoDonaciones";
    pub const REPORT_INFO: &str = "InfoReportes";
    pub const DOGS: &str = "Perros";
    pub const DOG_DETAIL: &str = "DetallesPerros";
    pub const REPORT_FORM: &str = "FormularioReportes";
    pub const DONATION_FORM: &str = "FormularioDonaciones";
    pub const NOT_FOUND: &str = "404";
}

/// A named template plus the data it is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub template: &'static str,
    pub title: String,
    pub data: Map<String, Value>,
}

impl View {
    pub fn new(template: &'static str, title: impl Into<String>) -> Self {
        let title = title.into();
        let mut data = Map::new();
        data.insert("title".to_string(), Value::String(title.clone()));
        data.insert("user".to_string(), Value::Null);
        Self {
            template,
            title,
            data,
        }
    }

    /// Attach the logged-in user (or explicitly nobody).
    pub fn user(self, user: Option<&User>) -> Self {
        self.with("user", user)
    }

    /// Attach a value under `key`, replacing any previous one.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::error!(error = %e, key, "View data is not serializable");
            Value::Null
        });
        self.data.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to render {template}: {reason}")]
pub struct RenderError {
    pub template: &'static str,
    pub reason: String,
}

/// Renders views into response bodies.
pub trait Presenter: Send + Sync {
    fn render(&self, view: &View) -> Result<String, RenderError>;
}

/// HTML shell with the view payload embedded as JSON.
#[derive(Debug, Clone, Default)]
pub struct ShellPresenter;

impl Presenter for ShellPresenter {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let payload = serde_json::to_string(&view.data).map_err(|e| RenderError {
            template: view.template,
            reason: e.to_string(),
        })?;
        let template = escape_html(view.template);

        Ok(format!(
            "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/static/css/estilos.css\">\n\
             </head>\n<body data-view=\"{template}\">\n<main id=\"app\"></main>\n\
             <script type=\"application/json\" id=\"view-data\">{payload}</script>\n\
             <script src=\"/static/js/{template}.js\" defer></script>\n</body>\n</html>\n",
            title = escape_html(&view.title),
            template = template,
            payload = escape_script_json(&payload),
        ))
    }
}

/// Render `view` with `status`. A presenter failure becomes the generic
/// error page.
pub fn render(presenter: &dyn Presenter, status: StatusCode, view: View) -> Response {
    match presenter.render(&view) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => AppError::Internal(e.into()).into_response(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON stays valid JSON, but can no longer close the script element.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
