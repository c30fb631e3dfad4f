//! Object representation switch.
//!
//! The simulation shows either a closed coil or an open straight conductor.
//! The mode decides which formulas the resolver applies and which derived
//! quantities are worth displaying; it never touches position, velocity or
//! history.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which moving object the simulation currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectMode {
    /// Closed multi-turn loop; carries current and feels a Lenz force.
    #[default]
    Coil,
    /// Open straight bar; separates charge but carries no current.
    Conductor,
}

impl ObjectMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Coil => Self::Conductor,
            Self::Conductor => Self::Coil,
        }
    }

    /// Whether the object forms a closed circuit.
    #[must_use]
    pub const fn is_closed_circuit(self) -> bool {
        matches!(self, Self::Coil)
    }

    /// Whether the induced current is meaningful to show.
    #[must_use]
    pub const fn shows_current(self) -> bool {
        self.is_closed_circuit()
    }

    /// Whether the top/bottom potential split is meaningful to show.
    #[must_use]
    pub const fn shows_potential_split(self) -> bool {
        matches!(self, Self::Conductor)
    }

    /// Whether the area and turns controls affect the model.
    #[must_use]
    pub const fn uses_coil_controls(self) -> bool {
        self.is_closed_circuit()
    }

    /// Lookup key naming the object for status messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coil => "coil",
            Self::Conductor => "conductor",
        }
    }
}

impl fmt::Display for ObjectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ObjectMode::Coil, ObjectMode::Conductor)]
    #[case(ObjectMode::Conductor, ObjectMode::Coil)]
    fn toggling_flips_mode(#[case] from: ObjectMode, #[case] to: ObjectMode) {
        assert_eq!(from.toggled(), to);
        assert_eq!(from.toggled().toggled(), from);
    }

    #[rstest]
    fn display_quantities_are_mode_exclusive() {
        for mode in [ObjectMode::Coil, ObjectMode::Conductor] {
            assert_ne!(mode.shows_current(), mode.shows_potential_split());
        }
        assert!(ObjectMode::Coil.uses_coil_controls());
        assert!(!ObjectMode::Conductor.uses_coil_controls());
    }

    #[rstest]
    fn mode_deserialises_from_lowercase() {
        let mode: ObjectMode = serde_json::from_str("\"conductor\"").expect("valid mode");
        assert_eq!(mode, ObjectMode::Conductor);
    }
}
