// Copyright (c) 2024 PostFinance AG
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the generator and the policy loader.
///
/// Policy violations found by [`crate::validate`] are not errors, they are
/// reported as a [`crate::ComplianceError`] value.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument was outside of its accepted range.
    #[error("{name} {reason}: got {value}")]
    InvalidArgument {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    #[error("Failed to read policy file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse policy: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, value: usize, reason: &'static str) -> Self {
        Error::InvalidArgument {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
