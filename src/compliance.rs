// Copyright (c) 2024 PostFinance AG
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::password::CharacterClass;

/// Outcome of checking a password against a policy.
///
/// The numeric codes are shared with external policy systems and must not
/// change. Only [`NoError`](Self::NoError), [`TooShort`](Self::TooShort),
/// [`TooLong`](Self::TooLong) and [`TooWeak`](Self::TooWeak) are produced by
/// [`validate`]. The remaining variants belong to history, keyword and
/// external-system checks that live outside of this crate; see
/// [`is_external`](Self::is_external).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ComplianceError {
    NoError = 0,
    /// External only.
    RepeatedInHistory = 1,
    TooShort = 2,
    /// External only.
    KeywordFound = 3,
    TooWeak = 4,
    /// External only.
    UsedInExternalSystem = 5,
    TooLong = 6,
}

impl ComplianceError {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_ok(self) -> bool {
        self == ComplianceError::NoError
    }

    /// Whether only an external policy layer can report this outcome.
    pub fn is_external(self) -> bool {
        matches!(
            self,
            ComplianceError::RepeatedInHistory
                | ComplianceError::KeywordFound
                | ComplianceError::UsedInExternalSystem
        )
    }

    pub fn is_core(self) -> bool {
        !self.is_external()
    }
}

impl TryFrom<u8> for ComplianceError {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ComplianceError::NoError),
            1 => Ok(ComplianceError::RepeatedInHistory),
            2 => Ok(ComplianceError::TooShort),
            3 => Ok(ComplianceError::KeywordFound),
            4 => Ok(ComplianceError::TooWeak),
            5 => Ok(ComplianceError::UsedInExternalSystem),
            6 => Ok(ComplianceError::TooLong),
            _ => Err(code),
        }
    }
}

impl fmt::Display for ComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            ComplianceError::NoError => "no error found",
            ComplianceError::RepeatedInHistory => {
                "password must not match one of the recently used passwords"
            }
            ComplianceError::TooShort => "password is shorter than the minimum length",
            ComplianceError::KeywordFound => "password contains a forbidden keyword",
            ComplianceError::TooWeak => {
                "password must contain a lowercase letter, an uppercase letter and a digit"
            }
            ComplianceError::UsedInExternalSystem => {
                "password is not allowed by an external system"
            }
            ComplianceError::TooLong => "password is longer than the maximum length",
        };
        write!(f, "{message}")
    }
}

/// Checks `password` against a length range and mandatory character classes.
///
/// The first failing rule wins: too short, then too long, then missing one of
/// digit, lowercase or uppercase letter. Lengths count characters, not bytes.
pub fn validate(password: &str, min_length: usize, max_length: usize) -> ComplianceError {
    let length = password.chars().count();

    let outcome = if password.is_empty() || length < min_length {
        ComplianceError::TooShort
    } else if length > max_length {
        ComplianceError::TooLong
    } else if !CharacterClass::ALL
        .iter()
        .all(|class| password.chars().any(|c| class.contains(c)))
    {
        ComplianceError::TooWeak
    } else {
        ComplianceError::NoError
    };

    debug!("Password of length {length} validated against [{min_length}, {max_length}]: {outcome:?}");
    outcome
}

/// Method form of [`validate`], e.g. `"testpas21sdTSAfa".validate(9, 30)`.
pub trait Validate {
    fn validate(&self, min_length: usize, max_length: usize) -> ComplianceError;
}

impl Validate for str {
    fn validate(&self, min_length: usize, max_length: usize) -> ComplianceError {
        validate(self, min_length, max_length)
    }
}
