//! Simulator configuration.
//!
//! The qubit cap bounds `2^n` memory for every simulator and session.
//! Values come from [`SimConfig::default`] or a TOML file:
//!
//! ```toml
//! max_qubits = 8
//! seed = 42
//! tolerance = 1e-6
//! ```
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default qubit cap for simulators and playground sessions.
pub const DEFAULT_MAX_QUBITS: usize = 10;

/// Largest cap a configuration may request (2^24 amplitudes ≈ 256 MiB).
pub const HARD_QUBIT_LIMIT: usize = 24;

/// Normalization tolerance used by invariant checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Upper bound on the qubit count accepted at construction.
    pub max_qubits: usize,
    /// Fixed RNG seed for reproducible measurements. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Tolerance for `Σ|a|² = 1` checks.
    pub tolerance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SimConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > HARD_QUBIT_LIMIT {
            return Err(SimError::Config(format!(
                "max_qubits must be between 1 and {HARD_QUBIT_LIMIT}, got {}",
                self.max_qubits
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(SimError::Config(format!(
                "tolerance must be in (0, 1), got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Check a requested qubit count against the cap.
    pub fn check_qubits(&self, num_qubits: usize) -> Result<()> {
        if num_qubits < 1 || num_qubits > self.max_qubits {
            return Err(SimError::InvalidDimension {
                requested: num_qubits,
                max: self.max_qubits,
            });
        }
        Ok(())
    }

    /// Clamp a requested qubit count into `[1, max_qubits]`.
    pub fn clamp_qubits(&self, num_qubits: usize) -> usize {
        num_qubits.clamp(1, self.max_qubits)
    }
}
