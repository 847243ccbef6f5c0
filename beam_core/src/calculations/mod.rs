//! # Beam Analysis Pipeline
//!
//! Each stage consumes the previous stage's output and never mutates it:
//!
//! - [`reactions`] - two-equation equilibrium solve over the reduced loads
//! - [`sequencer`] - sorted, merged nodes and the segments between them
//! - [`accumulator`] - piecewise shear and moment polynomials per segment
//! - [`results`] - sampled diagrams and extreme values
//! - [`beam`] - the [`Beam`] that owns the inputs and caches the solve
//! - [`input`] - JSON description of a beam
//!
//! The equivalent-load reducer lives with the load types in
//! [`crate::loads::equivalent`].

pub mod accumulator;
pub mod beam;
pub mod input;
pub mod polynomial;
pub mod reactions;
pub mod results;
pub mod sequencer;

// Re-export commonly used types
pub use accumulator::{Piece, Piecewise, Response};
pub use beam::Beam;
pub use input::{BeamInput, LoadInput, SupportInput};
pub use polynomial::Polynomial;
pub use reactions::Reactions;
pub use results::{AnalysisResults, Diagram};
pub use sequencer::{Node, NodeKind, Segment, Sequence};
