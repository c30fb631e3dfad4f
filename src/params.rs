//! Externally adjustable circuit parameters.
//!
//! Values arrive from UI controls. [`CircuitParameters::validate`] rejects
//! out-of-domain input at configuration time, while
//! [`CircuitParameters::sanitised`] clamps live control values so the
//! resolver never divides by a zero resistance.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numeric::{is_non_negative, is_positive};
use crate::{MIN_AREA, MIN_RESISTANCE};

/// Reasons a parameter set or configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The value is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The value must be zero or greater.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The value must be strictly greater than zero.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A coil needs at least one turn.
    #[error("coil must have at least one turn")]
    NoTurns,
    /// The lower position bound lies above the upper one.
    #[error("position bounds are inverted: min {min} > max {max}")]
    InvertedBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// The history buffer cannot hold zero samples.
    #[error("history capacity must be at least one")]
    EmptyHistory,
}

/// Checks that `value` is finite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}

/// Checks that `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    require_finite(name, value)?;
    if is_non_negative(value) {
        Ok(value)
    } else {
        Err(ParameterError::Negative { name, value })
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    require_finite(name, value)?;
    if is_positive(value) {
        Ok(value)
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

/// Circuit and drive parameters, each independently adjustable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitParameters {
    /// Magnetic field strength `B` in tesla.
    pub field_strength: f64,
    /// Number of coil turns `N`.
    pub turns: u32,
    /// Nominal coil area `A` in square metres.
    pub area: f64,
    /// Circuit resistance `R` in ohms. Used as a divisor.
    pub resistance: f64,
    /// Velocity requested by the user control, in metres per second.
    pub velocity: f64,
    /// External driving force in newtons.
    pub external_force: f64,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self {
            field_strength: 1.0,
            turns: 10,
            area: 1.0,
            resistance: 5.0,
            velocity: 2.0,
            external_force: 0.0,
        }
    }
}

impl CircuitParameters {
    /// Rejects values outside the model's domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] encountered.
    pub fn validate(&self) -> Result<(), ParameterError> {
        require_non_negative("field_strength", self.field_strength)?;
        if self.turns == 0 {
            return Err(ParameterError::NoTurns);
        }
        require_positive("area", self.area)?;
        require_positive("resistance", self.resistance)?;
        require_finite("velocity", self.velocity)?;
        require_non_negative("external_force", self.external_force)?;
        Ok(())
    }

    /// Clamps every value into its domain.
    ///
    /// Resistance is raised to [`MIN_RESISTANCE`] and area to [`MIN_AREA`];
    /// negative field strengths and forces become zero; non-finite values
    /// fall back to the smallest valid value. Any adjustment is logged.
    #[must_use]
    pub fn sanitised(self) -> Self {
        let clean = Self {
            field_strength: clamp_min("field_strength", self.field_strength, 0.0),
            turns: self.turns.max(1),
            area: clamp_min("area", self.area, MIN_AREA),
            resistance: clamp_min("resistance", self.resistance, MIN_RESISTANCE),
            velocity: if self.velocity.is_finite() {
                self.velocity
            } else {
                warn!("velocity {} is not finite; using 0", self.velocity);
                0.0
            },
            external_force: clamp_min("external_force", self.external_force, 0.0),
        };
        if clean.turns != self.turns {
            warn!("turns {} raised to {}", self.turns, clean.turns);
        }
        clean
    }
}

fn clamp_min(name: &str, value: f64, min: f64) -> f64 {
    if value.is_finite() && value >= min {
        return value;
    }
    warn!("{name} {value} out of range; clamped to {min}");
    min
}
