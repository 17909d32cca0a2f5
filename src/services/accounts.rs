// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User accounts: registration and credential checks.

use super::passwords::{PasswordError, Passwords};
use crate::db::{DataAccessError, Database};
use crate::models::{NewUser, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration form as submitted. Every field is required.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub nombre: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub direccion: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub telefono: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub correo: String,
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl RegistrationForm {
    /// Trim the text fields and fold the email to lowercase. The password
    /// is left exactly as typed.
    fn normalized(&self) -> Self {
        Self {
            nombre: self.nombre.trim().to_string(),
            direccion: self.direccion.trim().to_string(),
            telefono: self.telefono.trim().to_string(),
            correo: normalize_email(&self.correo),
            password: self.password.clone(),
        }
    }
}

/// Canonical form of an email address for storage and lookup.
pub fn normalize_email(correo: &str) -> String {
    correo.trim().to_lowercase()
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Password worker failed: {0}")]
    Worker(String),
}

/// Registration and login.
#[derive(Clone)]
pub struct AccountService {
    db: Database,
    passwords: Passwords,
}

impl AccountService {
    pub fn new(db: Database, passwords: Passwords) -> Self {
        Self { db, passwords }
    }

    /// Whether `correo` is already registered.
    pub async fn email_exists(&self, correo: &str) -> Result<bool, AccountError> {
        Ok(self.db.email_exists(&normalize_email(correo)).await?)
    }

    /// Create an account.
    ///
    /// The pre-check gives the common case a clean error; a concurrent
    /// registration that slips past it is caught by the unique index and
    /// reported the same way.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AccountError> {
        let form = form.normalized();

        if let Err(errors) = form.validate() {
            let mut missing: Vec<&'static str> = errors
                .field_errors()
                .keys()
                .map(|field| field_name(field))
                .collect();
            missing.sort_by_key(|field| FIELD_ORDER.iter().position(|f| f == field));
            return Err(AccountError::Validation(missing));
        }

        if self.db.email_exists(&form.correo).await? {
            return Err(AccountError::DuplicateEmail);
        }

        let password_hash = self.hash_blocking(form.password.clone()).await?;

        let new_user = NewUser {
            nombre: form.nombre,
            direccion: form.direccion,
            telefono: form.telefono,
            correo: form.correo,
            password_hash,
        };

        match self.db.insert_user(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(user)
            }
            Err(DataAccessError::UniqueViolation { .. }) => {
                tracing::info!("Registration lost a race on a duplicate email");
                Err(AccountError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials.
    ///
    /// Unknown email and wrong password both come back as `Ok(None)` after
    /// the same amount of hashing work.
    pub async fn authenticate(
        &self,
        correo: &str,
        password: &str,
    ) -> Result<Option<User>, AccountError> {
        let stored = self.db.find_user_by_email(&normalize_email(correo)).await?;

        let passwords = self.passwords.clone();
        let password = password.to_string();
        let stored_hash = stored.as_ref().map(|s| s.password_hash.clone());

        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => passwords.verify(&password, &hash),
            None => passwords.verify_decoy(&password),
        })
        .await
        .map_err(|e| AccountError::Worker(e.to_string()))?;

        if verified {
            Ok(stored.map(|s| s.user))
        } else {
            tracing::info!("Login rejected");
            Ok(None)
        }
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AccountError> {
        let passwords = self.passwords.clone();
        let hash = tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AccountError::Worker(e.to_string()))??;
        Ok(hash)
    }
}

const FIELD_ORDER: [&str; 5] = ["nombre", "direccion", "telefono", "correo", "password"];

fn field_name(field: &str) -> &'static str {
    FIELD_ORDER
        .iter()
        .copied()
        .find(|known| *known == field)
        .unwrap_or("formulario")
}
