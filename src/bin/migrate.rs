// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create the database tables.
//!
//! Reads the same environment as the server (`DB_HOST`, `DB_USER`,
//! `DB_PASSWORD`, `DB_NAME` or `DATABASE_URL`) and applies the schema for
//! the detected dialect. Safe to run repeatedly.

use albergue::{config::Config, db::Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::connect(&config.database).await?;

    db.migrate().await?;
    db.close().await;

    Ok(())
}
