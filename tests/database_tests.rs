// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data access layer against an in-memory SQLite database.

use albergue::db::{DataAccessError, Database, SqlValue};
use albergue::models::NewUser;
use std::time::Duration;

mod common;

use common::{seed_dog, test_db};

fn new_user(correo: &str) -> NewUser {
    NewUser {
        nombre: "Ana".to_string(),
        direccion: "Calle Luna 12".to_string(),
        telefono: "555-0100".to_string(),
        correo: correo.to_string(),
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[tokio::test]
async fn test_pool_exhaustion_times_out() {
    let db = Database::connect_url("sqlite::memory:", 1, Duration::from_millis(100))
        .await
        .unwrap();

    let held = db.pool().unwrap().acquire().await.unwrap();
    let result = db.fetch_all("SELECT 1", &[]).await;
    assert!(matches!(result, Err(DataAccessError::PoolExhausted)));

    drop(held);
    assert_eq!(db.fetch_all("SELECT 1", &[]).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_connection_returned_after_failed_query() {
    let db = test_db().await;

    let result = db.fetch_all("SELECT * FROM no_such_table", &[]).await;
    assert!(matches!(result, Err(DataAccessError::Query { .. })));

    // Only one connection: it must have come back.
    assert!(db.list_dogs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unique_email_enforced() {
    let db = test_db().await;

    let user = db.insert_user(&new_user("ana@example.com")).await.unwrap();
    assert!(user.id > 0);
    assert!(db.email_exists("ana@example.com").await.unwrap());
    assert!(!db.email_exists("luis@example.com").await.unwrap());

    let result = db.insert_user(&new_user("ana@example.com")).await;
    assert!(matches!(result, Err(DataAccessError::UniqueViolation { .. })));
}

#[tokio::test]
async fn test_find_user_by_email() {
    let db = test_db().await;
    let inserted = db.insert_user(&new_user("ana@example.com")).await.unwrap();

    let stored = db
        .find_user_by_email("ana@example.com")
        .await
        .unwrap()
        .expect("user exists");
    assert_eq!(stored.user, inserted);
    assert!(stored.password_hash.starts_with("$argon2id$"));

    assert!(db.find_user_by_email("nadie@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_dog() {
    let db = test_db().await;
    let id = seed_dog(&db, "Toby", "Pastor").await;

    let dog = db.get_dog(id).await.unwrap().expect("dog exists");
    assert_eq!(dog.nombre, "Toby");
    assert_eq!(dog.raza.as_deref(), Some("Pastor"));
    assert!(db.get_dog(id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_donation_foreign_key_enforced() {
    let db = test_db().await;

    let result = db
        .execute(
            "INSERT INTO donaciones (tipo_donacion, monto, id_usuario, creado_en) \
             VALUES (?, ?, ?, ?)",
            &[
                SqlValue::from("economica"),
                SqlValue::from(5.0),
                SqlValue::from(99i64),
                SqlValue::from("2026-01-01T00:00:00Z"),
            ],
        )
        .await;
    assert!(matches!(result, Err(DataAccessError::ForeignKeyViolation(_))));
}

#[tokio::test]
async fn test_offline_database_is_unavailable() {
    let db = Database::offline();
    assert!(matches!(
        db.list_dogs().await,
        Err(DataAccessError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_inserts_return_generated_ids() {
    let db = test_db().await;

    let ana = db.insert_user(&new_user("ana@example.com")).await.unwrap();
    let luis = db.insert_user(&new_user("luis@example.com")).await.unwrap();
    assert_eq!((ana.id, luis.id), (1, 2));

    let payload = albergue::models::DonationPayload::Economica { monto: 50.0 };
    let first = db
        .insert_donation(luis.id, &payload, "2026-01-01T00:00:00Z")
        .await
        .unwrap();
    let second = db
        .insert_donation(ana.id, &payload, "2026-01-01T00:00:01Z")
        .await
        .unwrap();
    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(first.id_usuario, luis.id);
    assert_eq!(common::count_rows(&db, "donaciones").await, 2);
}

#[tokio::test]
async fn test_rejected_insert_writes_nothing() {
    let db = test_db().await;

    let payload = albergue::models::DonationPayload::Economica { monto: 5.0 };
    let result = db
        .insert_donation(99, &payload, "2026-01-01T00:00:00Z")
        .await;
    assert!(matches!(result, Err(DataAccessError::ForeignKeyViolation(_))));
    assert_eq!(common::count_rows(&db, "donaciones").await, 0);
}
