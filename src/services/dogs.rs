// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dog catalogue reads.

use crate::db::{DataAccessError, Database};
use crate::models::Dog;

/// Result of listing the catalogue.
///
/// A database failure does not propagate: the page still renders, empty and
/// flagged.
#[derive(Debug, Clone, Default)]
pub struct DogListing {
    pub perros: Vec<Dog>,
    pub failed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DogLookupError {
    #[error("Dog not found")]
    NotFound,

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

#[derive(Clone)]
pub struct DogCatalog {
    db: Database,
}

impl DogCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> DogListing {
        match self.db.list_dogs().await {
            Ok(perros) => DogListing {
                perros,
                failed: false,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to load dogs");
                DogListing {
                    perros: Vec::new(),
                    failed: true,
                }
            }
        }
    }

    /// Look up a dog by the raw path segment. Anything that is not a
    /// positive integer is simply not found.
    pub async fn get(&self, raw_id: &str) -> Result<Dog, DogLookupError> {
        let id: i64 = match raw_id.trim().parse() {
            Ok(id) if id > 0 => id,
            _ => return Err(DogLookupError::NotFound),
        };

        self.db.get_dog(id).await?.ok_or(DogLookupError::NotFound)
    }
}
