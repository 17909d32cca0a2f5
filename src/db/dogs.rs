// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `perros` table operations.

use super::{Database, DataAccessError, SqlValue};
use crate::models::Dog;
use sqlx::FromRow;

const DOG_COLUMNS: &str = "id, nombre, raza, edad, sexo, descripcion, imagen";

impl Database {
    /// Every dog in the catalogue, by id.
    pub async fn list_dogs(&self) -> Result<Vec<Dog>, DataAccessError> {
        let rows = self
            .fetch_all(
                &format!("SELECT {DOG_COLUMNS} FROM perros ORDER BY id"),
                &[],
            )
            .await?;

        rows.iter()
            .map(|row| Dog::from_row(row).map_err(DataAccessError::from))
            .collect()
    }

    /// A single dog, if it exists.
    pub async fn get_dog(&self, id: i64) -> Result<Option<Dog>, DataAccessError> {
        let row = self
            .fetch_optional(
                &format!("SELECT {DOG_COLUMNS} FROM perros WHERE id = ?"),
                &[SqlValue::from(id)],
            )
            .await?;

        row.map(|r| Dog::from_row(&r))
            .transpose()
            .map_err(DataAccessError::from)
    }
}
