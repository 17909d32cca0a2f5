// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `usuarios` table operations.

use super::{Database, DataAccessError, SqlValue};
use crate::models::{NewUser, User};
use sqlx::FromRow;

/// A user row together with its password hash. Never leaves the account
/// service.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    nombre: String,
    direccion: String,
    telefono: String,
    correo: String,
    password_hash: String,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: row.id,
                nombre: row.nombre,
                direccion: row.direccion,
                telefono: row.telefono,
                correo: row.correo,
            },
            password_hash: row.password_hash,
        }
    }
}

impl Database {
    /// Whether any user is registered under `correo`.
    pub async fn email_exists(&self, correo: &str) -> Result<bool, DataAccessError> {
        let row = self
            .fetch_optional(
                "SELECT id FROM usuarios WHERE correo = ? LIMIT 1",
                &[SqlValue::from(correo)],
            )
            .await?;
        Ok(row.is_some())
    }

    /// Look a user up by email, including the password hash.
    pub async fn find_user_by_email(
        &self,
        correo: &str,
    ) -> Result<Option<StoredUser>, DataAccessError> {
        let row = self
            .fetch_optional(
                "SELECT id, nombre, direccion, telefono, correo, password_hash \
                 FROM usuarios WHERE correo = ?",
                &[SqlValue::from(correo)],
            )
            .await?;

        row.map(|r| UserRow::from_row(&r).map(StoredUser::from))
            .transpose()
            .map_err(DataAccessError::from)
    }

    /// Insert a user and return it with its generated id.
    ///
    /// A duplicate email surfaces as [`DataAccessError::UniqueViolation`].
    pub async fn insert_user(&self, new_user: &NewUser) -> Result<User, DataAccessError> {
        let id = self
            .insert_returning_id(
                "INSERT INTO usuarios (nombre, direccion, telefono, correo, password_hash) \
                 VALUES (?, ?, ?, ?, ?)",
                &[
                    SqlValue::from(new_user.nombre.as_str()),
                    SqlValue::from(new_user.direccion.as_str()),
                    SqlValue::from(new_user.telefono.as_str()),
                    SqlValue::from(new_user.correo.as_str()),
                    SqlValue::from(new_user.password_hash.as_str()),
                ],
            )
            .await?;

        Ok(User {
            id,
            nombre: new_user.nombre.clone(),
            direccion: new_user.direccion.clone(),
            telefono: new_user.telefono.clone(),
            correo: new_user.correo.clone(),
        })
    }
}
