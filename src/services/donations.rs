// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Donation recording.
//!
//! Validation runs in a fixed order: type, then the amount for economic
//! donations, then name and quantity for material ones. The first failing
//! rule wins.

use crate::db::{DataAccessError, Database};
use crate::models::{Donation, DonationKind, DonationPayload};
use crate::time_utils::format_utc_rfc3339;
use serde::{Deserialize, Serialize};

/// Donation form exactly as submitted, kept verbatim so a failed submission
/// can be shown again without retyping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DonationForm {
    pub tipo_donacion: Option<String>,
    pub monto: Option<String>,
    pub nombre_material: Option<String>,
    pub cantidad_material: Option<String>,
    pub descripcion: Option<String>,
    pub id_usuario: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    #[error("Invalid donation type")]
    InvalidDonationType,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid material donation")]
    InvalidMaterial,

    #[error("Donor does not exist")]
    UnknownDonor,

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

impl DonationError {
    /// Message shown on the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            DonationError::InvalidDonationType => "Tipo de donación inválido",
            DonationError::InvalidAmount => "Monto inválido",
            DonationError::InvalidMaterial => "Datos inválidos",
            DonationError::UnknownDonor => "Usuario de la donación inválido",
            DonationError::DataAccess(_) => "Error procesando la donación.",
        }
    }

    /// Whether the submitter can fix this by editing the form.
    pub fn is_validation(&self) -> bool {
        !matches!(self, DonationError::DataAccess(_))
    }
}

/// Check a submitted form and build the payload to store.
pub fn validate(form: &DonationForm) -> Result<DonationPayload, DonationError> {
    let kind: DonationKind = form
        .tipo_donacion
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or(DonationError::InvalidDonationType)?;

    match kind {
        DonationKind::Economica => {
            let monto = positive_number(form.monto.as_deref()).ok_or(DonationError::InvalidAmount)?;
            Ok(DonationPayload::Economica { monto })
        }
        DonationKind::Material => {
            let nombre_material = form
                .nombre_material
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or(DonationError::InvalidMaterial)?;
            let cantidad_material = positive_number(form.cantidad_material.as_deref())
                .ok_or(DonationError::InvalidMaterial)?;
            let descripcion = form
                .descripcion
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string);

            Ok(DonationPayload::Material {
                nombre_material: nombre_material.to_string(),
                cantidad_material,
                descripcion,
            })
        }
    }
}

fn positive_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Persists validated donations.
#[derive(Clone)]
pub struct DonationService {
    db: Database,
}

impl DonationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate and store one donation.
    ///
    /// The donor is the form's `id_usuario` when present, otherwise the
    /// logged-in user. Nothing is written unless every rule passes, and the
    /// write is a single INSERT.
    pub async fn record(
        &self,
        form: &DonationForm,
        session_user_id: i64,
    ) -> Result<Donation, DonationError> {
        let payload = validate(form)?;
        let donor = resolve_donor(form.id_usuario.as_deref(), session_user_id)?;
        let now = format_utc_rfc3339(chrono::Utc::now());

        match self.db.insert_donation(donor, &payload, &now).await {
            Ok(donation) => {
                tracing::info!(
                    donation_id = donation.id,
                    user_id = donor,
                    kind = %payload.kind(),
                    "Donation recorded"
                );
                Ok(donation)
            }
            Err(DataAccessError::ForeignKeyViolation(_)) => {
                tracing::warn!(user_id = donor, "Donation for unknown user rejected");
                Err(DonationError::UnknownDonor)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn resolve_donor(raw: Option<&str>, session_user_id: i64) -> Result<i64, DonationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(session_user_id),
        Some(s) => match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(DonationError::UnknownDonor),
        },
    }
}
