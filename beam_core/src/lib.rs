//! # beam_core - Simply-Supported Beam Statics Engine
//!
//! `beam_core` computes support reactions and shear / bending-moment diagrams for
//! a statically determinate beam on two supports. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Exact**: shear and moment are carried as piecewise cubic polynomials,
//!   only sampled at the very end
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Sign Convention
//!
//! Forces and reactions are + upward. Positions are measured from the left end
//! of the beam. Sagging moment is positive.
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{Beam, Direction, SupportKind};
//!
//! let mut beam = Beam::new(12.0).unwrap();
//! beam.add_support(SupportKind::Pinned, 0.0).unwrap();
//! beam.add_support(SupportKind::Roller, 12.0).unwrap();
//! beam.add_distributed_load(3.0, 6.0, 6.0, Direction::Down).unwrap();
//! beam.add_point_load(9.0, 10.0, Direction::Down).unwrap();
//!
//! let (left, right) = beam.reactions().unwrap();
//! assert!((left + right - 28.0).abs() < 1e-9);
//!
//! // Serialize results for storage or transmission
//! let json = serde_json::to_string_pretty(&beam.analyze().unwrap()).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The analysis pipeline and the [`Beam`] entry point
//! - [`loads`] - Load shapes and the equivalent-load reducer
//! - [`supports`] - Support conditions and solved reactions
//! - [`settings`] - Sampling and tolerance settings
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod loads;
pub mod settings;
pub mod supports;

// Re-export commonly used types at crate root for convenience
pub use calculations::{AnalysisResults, Beam, BeamInput, Diagram};
pub use errors::{CalcError, CalcResult};
pub use loads::{Direction, Load, Orientation};
pub use settings::AnalysisSettings;
pub use supports::{SupportKind, SolvedSupport};
