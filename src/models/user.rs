// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and sessions.

use serde::{Deserialize, Serialize};

/// A registered user as the rest of the application sees it.
///
/// This is also the session snapshot, so it never carries the password
/// hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    /// Email address (unique, stored lowercased)
    pub correo: String,
}

/// A user about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
    /// Argon2id PHC string
    pub password_hash: String,
}
