// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `donaciones` table operations (append-only).

use super::{Database, DataAccessError, SqlValue};
use crate::models::{Donation, DonationPayload};

impl Database {
    /// Append one donation as a single INSERT.
    ///
    /// An `id_usuario` with no matching user surfaces as
    /// [`DataAccessError::ForeignKeyViolation`].
    pub async fn insert_donation(
        &self,
        id_usuario: i64,
        payload: &DonationPayload,
        creado_en: &str,
    ) -> Result<Donation, DataAccessError> {
        let (monto, nombre_material, cantidad_material, descripcion) = match payload {
            DonationPayload::Economica { monto } => (Some(*monto), None, None, None),
            DonationPayload::Material {
                nombre_material,
                cantidad_material,
                descripcion,
            } => (
                None,
                Some(nombre_material.clone()),
                Some(*cantidad_material),
                descripcion.clone(),
            ),
        };

        let id = self
            .insert_returning_id(
                "INSERT INTO donaciones \
                 (tipo_donacion, monto, nombre_material, cantidad_material, \
                 descripcion, id_usuario, creado_en) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                &[
                    SqlValue::from(payload.kind().as_str()),
                    SqlValue::from(monto),
                    SqlValue::from(nombre_material),
                    SqlValue::from(cantidad_material),
                    SqlValue::from(descripcion),
                    SqlValue::from(id_usuario),
                    SqlValue::from(creado_en),
                ],
            )
            .await?;

        Ok(Donation {
            id,
            id_usuario,
            payload: payload.clone(),
            creado_en: creado_en.to_string(),
        })
    }
}
