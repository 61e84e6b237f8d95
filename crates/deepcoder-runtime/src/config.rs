//! Run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings that affect how programs evaluate.
///
/// Passed to every [`crate::Interpreter`] explicitly, so back-to-back runs
/// with different settings never observe each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Modulus applied to arithmetic lambda results. 0 disables it.
    pub modulo: u32,
}

impl RunConfig {
    pub fn new(modulo: u32) -> Self {
        Self { modulo }
    }

    pub fn is_modular(&self) -> bool {
        self.modulo != 0
    }

    /// Reduce an arithmetic result into `[0, modulo)`, or pass it through
    /// when modular arithmetic is off.
    ///
    /// Takes the exact `i128` result of a lambda so the residue is never
    /// taken from a wrapped or clamped value.
    pub fn reduce(&self, n: i128) -> i128 {
        if self.is_modular() {
            n.rem_euclid(i128::from(self.modulo))
        } else {
            n
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
