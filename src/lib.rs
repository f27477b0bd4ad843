// Copyright (c) 2024 PostFinance AG
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! passgen - Random password generation and complexity validation.
//!
//! [`generate`] mints passwords holding at least one uppercase letter, one
//! lowercase letter and one digit, drawn from a cryptographically secure
//! source without modulo bias. [`validate`] classifies a password against a
//! length range and the same character classes.

mod compliance;
mod config;
mod error;
mod password;
mod random;

pub use compliance::{validate, ComplianceError, Validate};
pub use config::{read_policy, Policy};
pub use error::{Error, Result};
pub use password::{generate, generate_with, CharacterClass, MIN_GENERATED_LENGTH};
pub use random::{shuffle, uniform_below};
