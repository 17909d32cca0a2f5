// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Donation ledger model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Donation type as stored in `tipo_donacion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationKind {
    Economica,
    Material,
}

impl DonationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DonationKind::Economica => "economica",
            DonationKind::Material => "material",
        }
    }
}

impl fmt::Display for DonationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationKind {
    type Err = ();

    /// Exact match only: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economica" => Ok(DonationKind::Economica),
            "material" => Ok(DonationKind::Material),
            _ => Err(()),
        }
    }
}

/// The variant-specific part of a donation. Exactly one shape per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo_donacion", rename_all = "lowercase")]
pub enum DonationPayload {
    Economica {
        monto: f64,
    },
    Material {
        nombre_material: String,
        cantidad_material: f64,
        descripcion: Option<String>,
    },
}

impl DonationPayload {
    pub fn kind(&self) -> DonationKind {
        match self {
            DonationPayload::Economica { .. } => DonationKind::Economica,
            DonationPayload::Material { .. } => DonationKind::Material,
        }
    }
}

/// A persisted donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: i64,
    pub id_usuario: i64,
    #[serde(flatten)]
    pub payload: DonationPayload,
    /// When the donation was recorded (RFC3339, UTC)
    pub creado_en: String,
}
