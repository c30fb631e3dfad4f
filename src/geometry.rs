//! Overlap classification between the moving object and the field region.
//!
//! [`evaluate`] turns the object's centre position into one of four discrete
//! [`OverlapState`]s and a signed flux-change rate. The coil and the
//! conductor use slightly different boundary operators; both are kept as
//! they are so that touching an edge behaves the same as it always has for
//! each object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mode::ObjectMode;
use crate::params::CircuitParameters;
use crate::{
    COIL_AREA_SCALE, COIL_HEIGHT, COIL_MAX_FIELD_FRACTION, COIL_WIDTH_PER_ROOT_AREA,
    CONDUCTOR_HEIGHT, CONDUCTOR_WIDTH, FIELD_WIDTH, FIELD_X, FLUX_SCALE,
};

/// Fixed rectangular region of uniform magnetic field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRegion {
    /// Left edge.
    pub x: f64,
    /// Horizontal extent.
    pub width: f64,
}

impl Default for FieldRegion {
    fn default() -> Self {
        Self::new(FIELD_X, FIELD_WIDTH)
    }
}

impl FieldRegion {
    /// Creates a region starting at `x` spanning `width` units.
    #[must_use]
    pub const fn new(x: f64, width: f64) -> Self {
        Self { x, width }
    }

    /// Right edge.
    #[must_use]
    pub fn x_end(&self) -> f64 {
        self.x + self.width
    }
}

/// Horizontal extent of the object at a given centre position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
}

impl Span {
    /// Span of width `width` centred on `centre`.
    #[must_use]
    pub fn centred(centre: f64, width: f64) -> Self {
        let half = width / 2.0;
        Self {
            left: centre - half,
            right: centre + half,
        }
    }

    /// Whether any part of the span lies strictly within `field`.
    #[must_use]
    pub fn overlaps(&self, field: &FieldRegion) -> bool {
        self.right > field.x && self.left < field.x_end()
    }
}

/// Width of a coil with nominal `area`, limited to 90% of the field width.
///
/// # Examples
/// ```
/// use faraday::geometry::coil_width;
/// assert!((coil_width(1.0, 220.0) - 1.5_f64.sqrt() * 60.0).abs() < 1e-9);
/// assert!((coil_width(100.0, 220.0) - 198.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn coil_width(area: f64, field_width: f64) -> f64 {
    let natural = (area * COIL_AREA_SCALE).sqrt() * COIL_WIDTH_PER_ROOT_AREA;
    natural.min(field_width * COIL_MAX_FIELD_FRACTION)
}

/// The moving object with its variant-specific geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovingObject {
    /// Closed multi-turn loop.
    Coil {
        /// Width derived from the nominal area.
        width: f64,
        /// Fixed height.
        height: f64,
        /// Number of turns.
        turns: u32,
        /// Nominal area.
        area: f64,
    },
    /// Open straight bar.
    Conductor {
        /// Fixed width.
        width: f64,
        /// Fixed height.
        height: f64,
    },
}

impl MovingObject {
    /// Builds the object for `mode`, deriving coil width from the current area.
    #[must_use]
    pub fn for_mode(mode: ObjectMode, params: &CircuitParameters, field: &FieldRegion) -> Self {
        match mode {
            ObjectMode::Coil => Self::Coil {
                width: coil_width(params.area, field.width),
                height: COIL_HEIGHT,
                turns: params.turns,
                area: params.area,
            },
            ObjectMode::Conductor => Self::Conductor {
                width: CONDUCTOR_WIDTH,
                height: CONDUCTOR_HEIGHT,
            },
        }
    }

    /// Mode this variant belongs to.
    #[must_use]
    pub const fn mode(&self) -> ObjectMode {
        match self {
            Self::Coil { .. } => ObjectMode::Coil,
            Self::Conductor { .. } => ObjectMode::Conductor,
        }
    }

    /// Current width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        match *self {
            Self::Coil { width, .. } | Self::Conductor { width, .. } => width,
        }
    }

    /// Fixed height.
    ///
    /// # Examples
    /// ```
    /// use faraday::geometry::{FieldRegion, MovingObject};
    /// use faraday::{CircuitParameters, ObjectMode, CONDUCTOR_HEIGHT};
    /// let bar = MovingObject::for_mode(
    ///     ObjectMode::Conductor,
    ///     &CircuitParameters::default(),
    ///     &FieldRegion::default(),
    /// );
    /// assert_eq!(bar.height(), CONDUCTOR_HEIGHT);
    /// ```
    #[must_use]
    pub const fn height(&self) -> f64 {
        match *self {
            Self::Coil { height, .. } | Self::Conductor { height, .. } => height,
        }
    }

    /// Edges of the object when centred on `position`.
    #[must_use]
    pub fn span_at(&self, position: f64) -> Span {
        Span::centred(position, self.width())
    }
}

/// Discrete overlap classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapState {
    /// No part of the object is in the field.
    Outside,
    /// The whole object is in the field.
    Inside,
    /// The leading edge has crossed into the field; flux increases.
    Entering,
    /// The trailing edge is still in the field; flux decreases.
    Exiting,
}

impl OverlapState {
    /// Lookup key for localised status messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::Inside => "inside",
            Self::Entering => "entering",
            Self::Exiting => "exiting",
        }
    }

    /// Whether the flux through the object is changing in this state.
    #[must_use]
    pub const fn is_transition(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

impl fmt::Display for OverlapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overlap classification together with the flux-change rate it implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxState {
    /// Discrete classification.
    pub state: OverlapState,
    /// Signed rate of flux change in webers per second.
    pub flux_change_rate: f64,
}

impl FluxState {
    /// A state with no flux change.
    #[must_use]
    pub const fn steady(state: OverlapState) -> Self {
        Self {
            state,
            flux_change_rate: 0.0,
        }
    }
}

/// Classifies the object against `field` and computes the flux-change rate.
///
/// `velocity` is the authoritative object velocity (the integrated one in
/// autonomous motion). The coil rate uses the nominal `N·B·A`, the conductor
/// rate uses the length currently inside the field.
#[must_use]
pub fn evaluate(
    position: f64,
    object: &MovingObject,
    field: &FieldRegion,
    field_strength: f64,
    velocity: f64,
) -> FluxState {
    let span = object.span_at(position);
    match *object {
        MovingObject::Coil { turns, area, .. } => {
            let state = classify_coil(span, field);
            let rate = f64::from(turns) * field_strength * area * velocity * FLUX_SCALE;
            match state {
                OverlapState::Entering => FluxState {
                    state,
                    flux_change_rate: rate,
                },
                // Negated so the sign tracks decreasing flux; the classic
                // classroom version reported the entering rate here too.
                OverlapState::Exiting => FluxState {
                    state,
                    flux_change_rate: -rate,
                },
                OverlapState::Outside | OverlapState::Inside => FluxState::steady(state),
            }
        }
        MovingObject::Conductor { .. } => {
            let state = classify_conductor(span, field);
            let per_length = field_strength * velocity * FLUX_SCALE;
            match state {
                OverlapState::Entering => FluxState {
                    state,
                    flux_change_rate: per_length * (span.right - field.x),
                },
                OverlapState::Exiting => FluxState {
                    state,
                    flux_change_rate: -per_length * (field.x_end() - span.left),
                },
                OverlapState::Outside | OverlapState::Inside => FluxState::steady(state),
            }
        }
    }
}

fn classify_coil(span: Span, field: &FieldRegion) -> OverlapState {
    let (start, end) = (field.x, field.x_end());
    if span.right < start || span.left > end {
        OverlapState::Outside
    } else if span.left >= start && span.right <= end {
        OverlapState::Inside
    } else if span.right >= start && span.right <= end && span.left < start {
        OverlapState::Entering
    } else if span.left <= end && span.left >= start && span.right > end {
        OverlapState::Exiting
    } else {
        OverlapState::Outside
    }
}

fn classify_conductor(span: Span, field: &FieldRegion) -> OverlapState {
    let (start, end) = (field.x, field.x_end());
    if span.right <= start || span.left >= end {
        OverlapState::Outside
    } else if span.left >= start && span.right <= end {
        OverlapState::Inside
    } else if span.left < start && span.right > start && span.right <= end {
        OverlapState::Entering
    } else if span.left >= start && span.left < end && span.right > end {
        OverlapState::Exiting
    } else {
        OverlapState::Outside
    }
}
