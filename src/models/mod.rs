// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod dog;
pub mod donation;
pub mod user;

pub use dog::Dog;
pub use donation::{Donation, DonationKind, DonationPayload};
pub use user::{NewUser, User};
