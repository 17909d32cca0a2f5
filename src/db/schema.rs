// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Table definitions for each supported SQL dialect.
//!
//! The uniqueness of `usuarios.correo`, the donor foreign key and the
//! one-variant-per-donation rule are all enforced by the store itself.

use super::{Database, DataAccessError};

/// SQL dialect behind the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    /// Detect the dialect from a connection URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?;
        match scheme {
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    /// `CREATE TABLE` statements, in dependency order.
    pub fn statements(self) -> &'static [&'static str] {
        match self {
            Dialect::MySql => MYSQL,
            Dialect::Sqlite => SQLITE,
        }
    }
}

const MYSQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS usuarios (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        nombre VARCHAR(120) NOT NULL,
        direccion VARCHAR(255) NOT NULL,
        telefono VARCHAR(40) NOT NULL,
        correo VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        CONSTRAINT usuarios_correo_unique UNIQUE (correo)
    ) CHARACTER SET utf8mb4",
    "CREATE TABLE IF NOT EXISTS perros (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        nombre VARCHAR(120) NOT NULL,
        raza VARCHAR(120) NULL,
        edad BIGINT NULL,
        sexo VARCHAR(20) NULL,
        descripcion TEXT NULL,
        imagen VARCHAR(255) NULL
    ) CHARACTER SET utf8mb4",
    "CREATE TABLE IF NOT EXISTS donaciones (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        tipo_donacion VARCHAR(20) NOT NULL,
        monto DOUBLE NULL,
        nombre_material VARCHAR(255) NULL,
        cantidad_material DOUBLE NULL,
        descripcion TEXT NULL,
        id_usuario BIGINT NOT NULL,
        creado_en VARCHAR(40) NOT NULL,
        CONSTRAINT donaciones_usuario_fk FOREIGN KEY (id_usuario) REFERENCES usuarios (id),
        CONSTRAINT donaciones_variante CHECK (
            (tipo_donacion = 'economica' AND monto > 0
                AND nombre_material IS NULL AND cantidad_material IS NULL)
            OR (tipo_donacion = 'material' AND monto IS NULL
                AND nombre_material IS NOT NULL AND cantidad_material > 0)
        )
    ) CHARACTER SET utf8mb4",
];

const SQLITE: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS usuarios (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        direccion TEXT NOT NULL,
        telefono TEXT NOT NULL,
        correo TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS perros (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        raza TEXT,
        edad INTEGER,
        sexo TEXT,
        descripcion TEXT,
        imagen TEXT
    )",
    "CREATE TABLE IF NOT EXISTS donaciones (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tipo_donacion TEXT NOT NULL,
        monto REAL,
        nombre_material TEXT,
        cantidad_material REAL,
        descripcion TEXT,
        id_usuario INTEGER NOT NULL REFERENCES usuarios (id),
        creado_en TEXT NOT NULL,
        CHECK (
            (tipo_donacion = 'economica' AND monto > 0
                AND nombre_material IS NULL AND cantidad_material IS NULL)
            OR (tipo_donacion = 'material' AND monto IS NULL
                AND nombre_material IS NOT NULL AND cantidad_material > 0)
        )
    )",
];

impl Database {
    /// Create any missing tables.
    pub async fn migrate(&self) -> Result<(), DataAccessError> {
        for statement in self.dialect().statements() {
            self.execute(statement, &[]).await?;
        }
        tracing::info!(dialect = ?self.dialect(), "Schema up to date");
        Ok(())
    }
}
