// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod dogs;
pub mod donations;
pub mod passwords;
pub mod sessions;

pub use accounts::{AccountError, AccountService, RegistrationForm};
pub use dogs::{DogCatalog, DogListing, DogLookupError};
pub use donations::{DonationError, DonationForm, DonationService};
pub use passwords::{PasswordError, Passwords};
pub use sessions::SessionManager;
