//! Scene and model configuration.
//!
//! Every field has a default, so an empty JSON object yields the classic
//! scene: a 220-unit field starting at x = 500 and a coil parked at x = 80.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::FieldRegion;
use crate::kinematics::PositionBounds;
use crate::mode::ObjectMode;
use crate::params::{
    require_finite, require_non_negative, require_positive, CircuitParameters, ParameterError,
};
use crate::{
    DEFAULT_MASS, HISTORY_CAPACITY, HISTORY_NOISE_THRESHOLD, INITIAL_POSITION, REFRESH_INTERVAL_MS,
};

/// Errors raised while loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but holds out-of-domain values.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ParameterError),
}

/// Complete description of a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Magnetic-field rectangle.
    pub field: FieldRegion,
    /// Centre position on start and after reset.
    pub initial_position: f64,
    /// Hard position limits.
    pub bounds: PositionBounds,
    /// Object mass in kilograms.
    pub mass: f64,
    /// Chart history length.
    pub history_capacity: usize,
    /// Minimum movement between chart samples.
    pub history_noise_threshold: f64,
    /// Minimum spacing of parameter-driven refreshes, milliseconds.
    pub refresh_interval_ms: u64,
    /// Initial mode.
    pub mode: ObjectMode,
    /// Initial circuit parameters.
    pub params: CircuitParameters,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            field: FieldRegion::default(),
            initial_position: INITIAL_POSITION,
            bounds: PositionBounds::default(),
            mass: DEFAULT_MASS,
            history_capacity: HISTORY_CAPACITY,
            history_noise_threshold: HISTORY_NOISE_THRESHOLD,
            refresh_interval_ms: REFRESH_INTERVAL_MS,
            mode: ObjectMode::default(),
            params: CircuitParameters::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    ///
    /// # Examples
    /// ```
    /// use faraday::config::SimulationConfig;
    /// let config = SimulationConfig::from_json(r#"{ "mass": 2.0 }"#).unwrap();
    /// assert_eq!(config.mass, 2.0);
    /// assert_eq!(config.initial_position, 80.0);
    /// ```
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against its domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] encountered.
    pub fn validate(&self) -> Result<(), ParameterError> {
        require_finite("field.x", self.field.x)?;
        require_positive("field.width", self.field.width)?;
        self.bounds.validate()?;
        require_finite("initial_position", self.initial_position)?;
        require_positive("mass", self.mass)?;
        require_non_negative("history_noise_threshold", self.history_noise_threshold)?;
        if self.history_capacity == 0 {
            return Err(ParameterError::EmptyHistory);
        }
        self.params.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_document_yields_defaults() {
        let config = SimulationConfig::from_json("{}").expect("defaults are valid");
        assert_eq!(config, SimulationConfig::default());
    }

    #[rstest]
    fn nested_parameters_are_merged_with_defaults() {
        let config = SimulationConfig::from_json(
            r#"{ "mode": "conductor", "params": { "field_strength": 2.5 } }"#,
        )
        .expect("valid document");
        assert_eq!(config.mode, ObjectMode::Conductor);
        assert_eq!(config.params.field_strength, 2.5);
        assert_eq!(config.params.turns, CircuitParameters::default().turns);
    }

    #[rstest]
    #[case::zero_resistance(r#"{ "params": { "resistance": 0.0 } }"#)]
    #[case::zero_mass(r#"{ "mass": 0.0 }"#)]
    #[case::empty_history(r#"{ "history_capacity": 0 }"#)]
    #[case::inverted_bounds(r#"{ "bounds": { "min": 10.0, "max": 0.0 } }"#)]
    fn invalid_documents_are_rejected(#[case] document: &str) {
        assert!(matches!(
            SimulationConfig::from_json(document),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SimulationConfig::from_json("{ mass: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
