//! # Beam Loads
//!
//! Loads applied to a beam, as a closed set of shapes:
//!
//! - [`Load::Point`] - concentrated force at a position
//! - [`Load::Distributed`] - uniform intensity over `[start, end]`
//! - [`Load::Triangular`] - zero at one end, peak at the other
//! - [`Load::Trapezoidal`] - linear between two end intensities
//!
//! ## Sign Convention
//!
//! Loads are created from an unsigned magnitude plus a [`Direction`]. `Down`
//! negates the magnitude at construction, so every stored value is signed with
//! + = upward. The stored shape and sign are never rewritten afterwards; the
//! [`equivalent`] reducer derives point resultants on demand.
//!
//! ## Example
//!
//! ```
//! use beam_core::loads::{Direction, Load, Orientation};
//!
//! let p = Load::point(5.0, 10.0, Direction::Down);
//! assert_eq!(p.resultant(), -10.0);
//!
//! let tri = Load::triangular(0.0, 6.0, 4.0, Orientation::Ascending, Direction::Down);
//! assert_eq!(tri.resultant(), -12.0);
//! assert_eq!(tri.centroid(), 4.0);
//! ```

pub mod equivalent;

pub use equivalent::{reduce, EquivalentLoad};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Direction / Orientation
// ============================================================================

/// Which way a load acts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl Direction {
    /// +1 for up, -1 for down
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Where the peak of a triangular load sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Zero at start, peak at end
    Ascending,
    /// Peak at start, zero at end
    Descending,
}

// ============================================================================
// Load
// ============================================================================

/// A load applied to the beam. All values are signed (+ = upward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    /// Concentrated force
    Point { position: f64, magnitude: f64 },

    /// Uniform intensity (force/length)
    Distributed { start: f64, end: f64, intensity: f64 },

    /// Linearly varying intensity between zero and `peak`
    Triangular {
        start: f64,
        end: f64,
        peak: f64,
        orientation: Orientation,
    },

    /// Linearly varying intensity between two end values
    Trapezoidal {
        start: f64,
        end: f64,
        start_intensity: f64,
        end_intensity: f64,
    },
}

impl Load {
    /// Create a point load from an unsigned magnitude
    pub fn point(position: f64, magnitude: f64, direction: Direction) -> Self {
        Load::Point {
            position,
            magnitude: magnitude * direction.sign(),
        }
    }

    /// Create a uniform distributed load from an unsigned intensity
    pub fn distributed(start: f64, end: f64, intensity: f64, direction: Direction) -> Self {
        Load::Distributed {
            start,
            end,
            intensity: intensity * direction.sign(),
        }
    }

    /// Create a triangular load from an unsigned peak intensity
    pub fn triangular(
        start: f64,
        end: f64,
        peak: f64,
        orientation: Orientation,
        direction: Direction,
    ) -> Self {
        Load::Triangular {
            start,
            end,
            peak: peak * direction.sign(),
            orientation,
        }
    }

    /// Create a trapezoidal load from unsigned end intensities
    pub fn trapezoidal(
        start: f64,
        end: f64,
        start_intensity: f64,
        end_intensity: f64,
        direction: Direction,
    ) -> Self {
        Load::Trapezoidal {
            start,
            end,
            start_intensity: start_intensity * direction.sign(),
            end_intensity: end_intensity * direction.sign(),
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point { .. } => "Point",
            Load::Distributed { .. } => "Distributed",
            Load::Triangular { .. } => "Triangular",
            Load::Trapezoidal { .. } => "Trapezoidal",
        }
    }

    /// Whether the load acts over a length rather than at a position
    pub fn is_extended(&self) -> bool {
        !matches!(self, Load::Point { .. })
    }

    /// `(start, end)` of the loaded region; a point load has `start == end`
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Load::Point { position, .. } => (position, position),
            Load::Distributed { start, end, .. }
            | Load::Triangular { start, end, .. }
            | Load::Trapezoidal { start, end, .. } => (start, end),
        }
    }

    pub fn length(&self) -> f64 {
        let (start, end) = self.bounds();
        end - start
    }

    pub fn midpoint(&self) -> f64 {
        let (start, end) = self.bounds();
        (start + end) / 2.0
    }

    /// Intensity at the start and end boundary (force/length).
    /// `None` for point loads.
    pub fn boundary_intensities(&self) -> Option<(f64, f64)> {
        match *self {
            Load::Point { .. } => None,
            Load::Distributed { intensity, .. } => Some((intensity, intensity)),
            Load::Triangular {
                peak, orientation, ..
            } => match orientation {
                Orientation::Ascending => Some((0.0, peak)),
                Orientation::Descending => Some((peak, 0.0)),
            },
            Load::Trapezoidal {
                start_intensity,
                end_intensity,
                ..
            } => Some((start_intensity, end_intensity)),
        }
    }

    /// Orientation of the linearly varying part, if any.
    ///
    /// For a trapezoidal load this is derived from which end is larger in
    /// magnitude; equal ends have no triangular part.
    pub fn orientation(&self) -> Option<Orientation> {
        match *self {
            Load::Triangular { orientation, .. } => Some(orientation),
            Load::Trapezoidal {
                start_intensity,
                end_intensity,
                ..
            } => {
                if end_intensity.abs() > start_intensity.abs() {
                    Some(Orientation::Ascending)
                } else if end_intensity.abs() < start_intensity.abs() {
                    Some(Orientation::Descending)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Decompose into basic shapes.
    ///
    /// A trapezoid becomes a uniform part carrying the smaller end intensity
    /// plus a triangular part carrying the difference, peaking at the larger end.
    pub fn components(&self) -> Vec<LoadComponent> {
        match *self {
            Load::Point {
                position,
                magnitude,
            } => vec![LoadComponent::Concentrated {
                position,
                force: magnitude,
            }],
            Load::Distributed {
                start,
                end,
                intensity,
            } => vec![LoadComponent::Uniform {
                start,
                end,
                intensity,
            }],
            Load::Triangular {
                start,
                end,
                peak,
                orientation,
            } => vec![LoadComponent::Triangular {
                start,
                end,
                peak,
                orientation,
            }],
            Load::Trapezoidal {
                start,
                end,
                start_intensity,
                end_intensity,
            } => match self.orientation() {
                Some(Orientation::Ascending) => vec![
                    LoadComponent::Uniform {
                        start,
                        end,
                        intensity: start_intensity,
                    },
                    LoadComponent::Triangular {
                        start,
                        end,
                        peak: end_intensity - start_intensity,
                        orientation: Orientation::Ascending,
                    },
                ],
                Some(Orientation::Descending) => vec![
                    LoadComponent::Uniform {
                        start,
                        end,
                        intensity: end_intensity,
                    },
                    LoadComponent::Triangular {
                        start,
                        end,
                        peak: start_intensity - end_intensity,
                        orientation: Orientation::Descending,
                    },
                ],
                None => vec![LoadComponent::Uniform {
                    start,
                    end,
                    intensity: start_intensity,
                }],
            },
        }
    }

    /// Total signed force
    pub fn resultant(&self) -> f64 {
        self.components().iter().map(LoadComponent::resultant).sum()
    }

    /// Line of action of the resultant
    pub fn centroid(&self) -> f64 {
        let components = self.components();
        let total: f64 = components.iter().map(LoadComponent::resultant).sum();
        if total.abs() <= f64::EPSILON {
            return self.midpoint();
        }
        components
            .iter()
            .map(|c| c.resultant() * c.centroid())
            .sum::<f64>()
            / total
    }

    /// Check that the load fits on a beam of length `span`
    pub fn validate(&self, span: f64, tolerance: f64) -> CalcResult<()> {
        let (start, end) = self.bounds();
        for position in [start, end] {
            if !position.is_finite() || position < -tolerance || position > span + tolerance {
                return Err(CalcError::InvalidLoadPosition { position, span });
            }
        }

        let values: Vec<(&str, f64)> = match *self {
            Load::Point { magnitude, .. } => vec![("magnitude", magnitude)],
            Load::Distributed { intensity, .. } => vec![("intensity", intensity)],
            Load::Triangular { peak, .. } => vec![("peak", peak)],
            Load::Trapezoidal {
                start_intensity,
                end_intensity,
                ..
            } => vec![
                ("start_intensity", start_intensity),
                ("end_intensity", end_intensity),
            ],
        };
        for (field, value) in values {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Load magnitude must be finite",
                ));
            }
        }

        if self.is_extended() && end - start <= tolerance {
            return Err(CalcError::DegenerateLoadSpan { start, end });
        }
        Ok(())
    }
}

// ============================================================================
// Load Components
// ============================================================================

/// Basic load shape; every [`Load`] decomposes into one or two of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadComponent {
    Concentrated { position: f64, force: f64 },
    Uniform { start: f64, end: f64, intensity: f64 },
    Triangular {
        start: f64,
        end: f64,
        peak: f64,
        orientation: Orientation,
    },
}

impl LoadComponent {
    pub fn start(&self) -> f64 {
        match *self {
            LoadComponent::Concentrated { position, .. } => position,
            LoadComponent::Uniform { start, .. } | LoadComponent::Triangular { start, .. } => start,
        }
    }

    pub fn end(&self) -> f64 {
        match *self {
            LoadComponent::Concentrated { position, .. } => position,
            LoadComponent::Uniform { end, .. } | LoadComponent::Triangular { end, .. } => end,
        }
    }

    pub fn length(&self) -> f64 {
        self.end() - self.start()
    }

    pub fn resultant(&self) -> f64 {
        match *self {
            LoadComponent::Concentrated { force, .. } => force,
            LoadComponent::Uniform { intensity, .. } => intensity * self.length(),
            LoadComponent::Triangular { peak, .. } => peak * self.length() / 2.0,
        }
    }

    /// Position of the resultant: midpoint for uniform, 1/3 from the peak for
    /// triangular
    pub fn centroid(&self) -> f64 {
        match *self {
            LoadComponent::Concentrated { position, .. } => position,
            LoadComponent::Uniform { start, end, .. } => (start + end) / 2.0,
            LoadComponent::Triangular {
                start, orientation, ..
            } => match orientation {
                Orientation::Ascending => start + 2.0 * self.length() / 3.0,
                Orientation::Descending => start + self.length() / 3.0,
            },
        }
    }
}

// ============================================================================
// Applied Load
// ============================================================================

/// A load entry on a beam
///
/// Wraps the load shape with an identifier for row management and the
/// creation order used to break ties between coincident nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedLoad {
    /// Unique identifier for this load
    pub id: Uuid,

    pub load: Load,

    /// Creation order across all supports and loads of a beam
    pub sequence: usize,

    /// User note/description for this load
    #[serde(default)]
    pub note: String,
}

impl AppliedLoad {
    pub fn new(load: Load, sequence: usize) -> Self {
        AppliedLoad {
            id: Uuid::new_v4(),
            load,
            sequence,
            note: String::new(),
        }
    }

    /// Set note and return self (builder pattern)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
