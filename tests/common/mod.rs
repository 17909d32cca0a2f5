// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use albergue::config::Config;
use albergue::db::{Database, SqlValue};
use albergue::routes::create_router;
use albergue::views::ShellPresenter;
use albergue::AppState;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;
use sqlx::Row;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Create an in-memory SQLite database with the schema applied.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    let db = Database::connect_url("sqlite::memory:", 1, Duration::from_secs(2))
        .await
        .expect("Failed to open in-memory SQLite");
    db.migrate().await.expect("Failed to create schema");
    db
}

fn build_app(db: Database) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(
        AppState::new(Config::default(), db, Arc::new(ShellPresenter))
            .expect("Failed to build state"),
    );
    (create_router(state.clone()), state)
}

/// Create a test app backed by a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(test_db().await)
}

/// Create a test app whose database is unreachable.
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    build_app(Database::offline())
}

#[allow(dead_code)]
pub async fn seed_dog(db: &Database, nombre: &str, raza: &str) -> i64 {
    db.insert_returning_id(
        "INSERT INTO perros (nombre, raza, edad) VALUES (?, ?, ?)",
        &[SqlValue::from(nombre), SqlValue::from(raza), SqlValue::from(3i64)],
    )
    .await
    .expect("Failed to seed dog")
}

/// Row count of a table.
#[allow(dead_code)]
pub async fn count_rows(db: &Database, table: &str) -> i64 {
    let rows = db
        .fetch_all(&format!("SELECT COUNT(*) AS n FROM {table}"), &[])
        .await
        .expect("count query failed");
    rows[0].try_get::<i64, _>("n").expect("count column")
}

/// A `donaciones` row as stored.
#[allow(dead_code)]
#[derive(Debug, sqlx::FromRow)]
pub struct DonationRecord {
    pub tipo_donacion: String,
    pub monto: Option<f64>,
    pub nombre_material: Option<String>,
    pub cantidad_material: Option<f64>,
    pub descripcion: Option<String>,
    pub id_usuario: i64,
    pub creado_en: String,
}

/// Every stored donation, oldest first.
#[allow(dead_code)]
pub async fn stored_donations(db: &Database) -> Vec<DonationRecord> {
    let rows = db
        .fetch_all(
            "SELECT tipo_donacion, monto, nombre_material, cantidad_material, \
             descripcion, id_usuario, creado_en FROM donaciones ORDER BY id",
            &[],
        )
        .await
        .expect("donation query failed");
    rows.iter()
        .map(|row| sqlx::FromRow::from_row(row).expect("donation row"))
        .collect()
}

/// URL-encode form fields.
#[allow(dead_code)]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_form(uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(encode_form(fields))).unwrap()
}

#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// The `name=value` pair of the session cookie set by a response.
#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("albergue_sid="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

#[allow(dead_code)]
pub fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Template name and payload of a page rendered by the shell presenter.
#[allow(dead_code)]
pub async fn view_of(response: Response) -> (String, Value) {
    let html = body_string(response).await;

    let marker = "data-view=\"";
    let start = html.find(marker).expect("no data-view attribute") + marker.len();
    let end = start + html[start..].find('"').unwrap();
    let template = html[start..end].to_string();

    let marker = "id=\"view-data\">";
    let start = html.find(marker).expect("no view data") + marker.len();
    let end = start + html[start..].find("</script>").unwrap();
    let data = serde_json::from_str(&html[start..end]).expect("view data is JSON");

    (template, data)
}

#[allow(dead_code)]
pub fn registration(correo: &str) -> Vec<(&'static str, String)> {
    vec![
        ("nombre", "Ana Pérez".to_string()),
        ("direccion", "Calle Luna 12".to_string()),
        ("telefono", "555-0100".to_string()),
        ("correo", correo.to_string()),
        ("password", "perritos-felices".to_string()),
    ]
}

/// Register a user through the HTTP surface and return its session cookie.
#[allow(dead_code)]
pub async fn register_and_login(app: &axum::Router, correo: &str) -> String {
    let fields = registration(correo);
    let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();

    let response = send(app, post_form("/registro", &fields, None)).await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    session_cookie(&response).expect("registration sets a session cookie")
}
