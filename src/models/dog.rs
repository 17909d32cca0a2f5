// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dog model (read-only here; the shelter staff maintain the table).

use serde::{Deserialize, Serialize};

/// A dog in the shelter catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dog {
    pub id: i64,
    pub nombre: String,
    pub raza: Option<String>,
    /// Age in years
    pub edad: Option<i64>,
    pub sexo: Option<String>,
    pub descripcion: Option<String>,
    /// Picture path or URL
    pub imagen: Option<String>,
}
