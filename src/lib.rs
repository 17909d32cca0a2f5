// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Albergue: web backend for an animal shelter.
//!
//! This crate provides registration and login, server-side sessions, the
//! dog catalogue and the donation ledger, rendered through a pluggable
//! presentation adapter.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod views;

use axum::http::StatusCode;
use axum::response::Response;
use config::Config;
use db::Database;
use services::{AccountService, DogCatalog, DonationService, Passwords, SessionManager};
use std::sync::Arc;
use views::{Presenter, View};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub sessions: SessionManager,
    pub accounts: AccountService,
    pub dogs: DogCatalog,
    pub donations: DonationService,
    pub presenter: Arc<dyn Presenter>,
}

impl AppState {
    /// Wire every service around one database handle and one session store.
    pub fn new(
        config: Config,
        db: Database,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self, services::PasswordError> {
        let passwords = Passwords::new(&config.password_hashing)?;
        let sessions = SessionManager::new(config.session_ttl);

        Ok(Self {
            accounts: AccountService::new(db.clone(), passwords),
            dogs: DogCatalog::new(db.clone()),
            donations: DonationService::new(db.clone()),
            config,
            db,
            sessions,
            presenter,
        })
    }

    /// Render a view through the configured presenter.
    pub fn render(&self, status: StatusCode, view: View) -> Response {
        views::render(self.presenter.as_ref(), status, view)
    }
}
