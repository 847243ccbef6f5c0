//! # Beam Input
//!
//! JSON description of a beam, the format the CLI reads. Loads use the same
//! unsigned magnitude + direction form as the `Beam::add_*` calls.
//!
//! ## JSON Format
//! ```json
//! {
//!   "label": "B-1",
//!   "span": 10.0,
//!   "supports": [
//!     { "kind": "Pinned", "position": 0.0 },
//!     { "kind": "Roller", "position": 10.0 }
//!   ],
//!   "loads": [
//!     { "type": "Point", "position": 5.0, "magnitude": 10.0 },
//!     { "type": "Distributed", "start": 0.0, "end": 4.0, "intensity": 2.0, "direction": "Up" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::{Direction, Load, Orientation};
use crate::settings::AnalysisSettings;
use crate::supports::SupportKind;

/// A support entry in the input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportInput {
    #[serde(default)]
    pub kind: SupportKind,
    pub position: f64,
}

/// A load entry in the input; magnitudes are unsigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadInput {
    Point {
        position: f64,
        magnitude: f64,
        #[serde(default)]
        direction: Direction,
        #[serde(default)]
        note: String,
    },
    Distributed {
        start: f64,
        end: f64,
        intensity: f64,
        #[serde(default)]
        direction: Direction,
        #[serde(default)]
        note: String,
    },
    Triangular {
        start: f64,
        end: f64,
        peak: f64,
        orientation: Orientation,
        #[serde(default)]
        direction: Direction,
        #[serde(default)]
        note: String,
    },
    Trapezoidal {
        start: f64,
        end: f64,
        start_intensity: f64,
        end_intensity: f64,
        #[serde(default)]
        direction: Direction,
        #[serde(default)]
        note: String,
    },
}

impl LoadInput {
    /// Unsigned magnitudes with their field names
    pub fn magnitudes(&self) -> Vec<(&'static str, f64)> {
        match *self {
            LoadInput::Point { magnitude, .. } => vec![("magnitude", magnitude)],
            LoadInput::Distributed { intensity, .. } => vec![("intensity", intensity)],
            LoadInput::Triangular { peak, .. } => vec![("peak", peak)],
            LoadInput::Trapezoidal {
                start_intensity,
                end_intensity,
                ..
            } => vec![
                ("start_intensity", start_intensity),
                ("end_intensity", end_intensity),
            ],
        }
    }

    pub fn note(&self) -> &str {
        match self {
            LoadInput::Point { note, .. }
            | LoadInput::Distributed { note, .. }
            | LoadInput::Triangular { note, .. }
            | LoadInput::Trapezoidal { note, .. } => note,
        }
    }

    /// Convert to a signed [`Load`]
    pub fn to_load(&self) -> Load {
        match *self {
            LoadInput::Point {
                position,
                magnitude,
                direction,
                ..
            } => Load::point(position, magnitude, direction),
            LoadInput::Distributed {
                start,
                end,
                intensity,
                direction,
                ..
            } => Load::distributed(start, end, intensity, direction),
            LoadInput::Triangular {
                start,
                end,
                peak,
                orientation,
                direction,
                ..
            } => Load::triangular(start, end, peak, orientation, direction),
            LoadInput::Trapezoidal {
                start,
                end,
                start_intensity,
                end_intensity,
                direction,
                ..
            } => Load::trapezoidal(start, end, start_intensity, end_intensity, direction),
        }
    }
}

/// Input for a beam analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User-defined label for this beam (e.g., "B-1", "Header over garage")
    #[serde(default)]
    pub label: String,

    /// Beam length
    pub span: f64,

    #[serde(default)]
    pub supports: Vec<SupportInput>,

    #[serde(default)]
    pub loads: Vec<LoadInput>,

    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl BeamInput {
    /// Parse an input document
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate input parameters that do not depend on the solve
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(CalcError::invalid_input(
                "span",
                self.span.to_string(),
                "Span must be positive",
            ));
        }
        for load in &self.loads {
            for (field, value) in load.magnitudes() {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(CalcError::invalid_input(
                        field,
                        value.to_string(),
                        "Magnitude must be a non-negative number; use direction for sense",
                    ));
                }
            }
        }
        self.settings.validate()
    }
}
