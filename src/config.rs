// Copyright (c) 2024 PostFinance AG
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

use crate::compliance::{validate, ComplianceError};
use crate::error::{Error, Result};
use crate::password::{generate, MIN_GENERATED_LENGTH};

/// Length bounds used for validation and the length of generated passwords.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    pub min_length: usize,
    pub max_length: usize,
    pub length: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            min_length: 9,
            max_length: 30,
            length: 20,
        }
    }
}

impl Policy {
    /// Rejects bounds that no password could satisfy.
    pub fn check(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(Error::invalid_argument(
                "min_length",
                self.min_length,
                "must be at least 1",
            ));
        }
        if self.max_length < self.min_length {
            return Err(Error::invalid_argument(
                "max_length",
                self.max_length,
                "is below min_length",
            ));
        }
        if self.length < MIN_GENERATED_LENGTH {
            return Err(Error::invalid_argument("length", self.length, "too short"));
        }
        if self.length < self.min_length || self.length > self.max_length {
            return Err(Error::invalid_argument(
                "length",
                self.length,
                "is outside of [min_length, max_length]",
            ));
        }

        Ok(())
    }

    /// Generates a password of the configured length.
    pub fn generate(&self) -> Result<String> {
        generate(self.length)
    }

    pub fn validate(&self, password: &str) -> ComplianceError {
        validate(password, self.min_length, self.max_length)
    }
}

/// Reads a YAML policy file. Missing keys fall back to [`Policy::default`].
pub fn read_policy<P: AsRef<Path>>(policy_path: P) -> Result<Policy> {
    let policy_path = policy_path.as_ref();
    debug!("Reading policy at: {}", policy_path.display());

    let io_error = |source: std::io::Error| Error::Io {
        path: policy_path.to_path_buf(),
        source,
    };

    let mut policy_data = String::new();
    File::open(policy_path)
        .and_then(|mut policy_file| policy_file.read_to_string(&mut policy_data))
        .map_err(io_error)?;

    let policy: Policy = serde_yaml::from_str(&policy_data)?;
    policy.check()?;

    debug!("Loaded policy: {policy:?}");
    Ok(policy)
}
