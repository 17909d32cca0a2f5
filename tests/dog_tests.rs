// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dog catalogue pages.

use axum::http::StatusCode;

mod common;

use common::{create_test_app, get, register_and_login, seed_dog, send, view_of};

#[tokio::test]
async fn test_list_dogs_in_catalogue_order() {
    let (app, state) = create_test_app().await;
    seed_dog(&state.db, "Firulais", "Mestizo").await;
    seed_dog(&state.db, "Luna", "Labrador").await;
    let cookie = register_and_login(&app, "ana@example.com").await;

    let response = send(&app, get("/perros", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (template, data) = view_of(response).await;
    assert_eq!(template, "Perros");
    assert!(data["error"].is_null());

    let perros = data["perros"].as_array().unwrap();
    assert_eq!(perros.len(), 2);
    assert_eq!(perros[0]["nombre"], "Firulais");
    assert_eq!(perros[1]["nombre"], "Luna");
    assert_eq!(perros[1]["raza"], "Labrador");
    assert!(perros[0]["descripcion"].is_null());
}

#[tokio::test]
async fn test_empty_catalogue() {
    let (app, _state) = create_test_app().await;
    let cookie = register_and_login(&app, "ana@example.com").await;

    let response = send(&app, get("/perros", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let (_, data) = view_of(response).await;
    assert_eq!(data["perros"], serde_json::json!([]));
}

#[tokio::test]
async fn test_list_dogs_with_database_down() {
    let (app, state) = create_test_app().await;
    let cookie = register_and_login(&app, "ana@example.com").await;

    // The session outlives the database.
    state.db.close().await;

    let response = send(&app, get("/perros", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let (template, data) = view_of(response).await;
    assert_eq!(template, "Perros");
    assert_eq!(data["perros"], serde_json::json!([]));
    assert_eq!(data["error"], "No se pudieron cargar los perros.");
    assert_eq!(data["user"]["correo"], "ana@example.com");
}

#[tokio::test]
async fn test_dog_detail() {
    let (app, state) = create_test_app().await;
    let id = seed_dog(&state.db, "Canela", "Beagle").await;
    let cookie = register_and_login(&app, "ana@example.com").await;

    let response = send(&app, get(&format!("/perros/{id}"), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (template, data) = view_of(response).await;
    assert_eq!(template, "DetallesPerros");
    assert_eq!(data["title"], "Detalles de Canela");
    assert_eq!(data["perro"]["id"], id);
    assert_eq!(data["perro"]["edad"], 3);
    assert!(data["error"].is_null());
}

#[tokio::test]
async fn test_dog_detail_not_found() {
    let (app, state) = create_test_app().await;
    seed_dog(&state.db, "Canela", "Beagle").await;
    let cookie = register_and_login(&app, "ana@example.com").await;

    for path in ["/perros/999", "/perros/abc", "/perros/0", "/perros/-1"] {
        let response = send(&app, get(path, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");

        let (template, data) = view_of(response).await;
        assert_eq!(template, "404");
        assert_eq!(data["title"], "Perro no encontrado");
    }
}

#[tokio::test]
async fn test_dog_detail_with_database_down() {
    let (app, state) = create_test_app().await;
    let cookie = register_and_login(&app, "ana@example.com").await;
    state.db.close().await;

    let response = send(&app, get("/perros/1", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let (template, data) = view_of(response).await;
    assert_eq!(template, "DetallesPerros");
    assert!(data["perro"].is_null());
    assert_eq!(data["error"], "No se pudieron cargar los detalles.");
}
