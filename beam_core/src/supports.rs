//! # Supports
//!
//! Support conditions for a simply-supported beam. Only supports that provide a
//! single vertical reaction component (pinned, roller) can be solved by the
//! two-equation equilibrium solve; a fixed support adds a moment component and
//! makes the beam statically indeterminate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Support condition at a position along the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SupportKind {
    /// Pinned/hinged support - restrains vertical displacement, allows rotation
    ///
    /// The horizontal component is never loaded (no axial analysis), so a pin
    /// contributes one reaction component here.
    #[default]
    Pinned,

    /// Roller support - restrains vertical displacement only
    Roller,

    /// Fixed support - restrains displacement and rotation
    ///
    /// Creates a moment reaction; rejected by the reaction solver.
    Fixed,
}

impl SupportKind {
    /// Number of reaction components this support contributes to the
    /// in-plane vertical problem
    pub fn reaction_components(&self) -> usize {
        match self {
            SupportKind::Pinned | SupportKind::Roller => 1,
            SupportKind::Fixed => 2,
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Pinned => "Pinned",
            SupportKind::Roller => "Roller",
            SupportKind::Fixed => "Fixed",
        }
    }

    /// Get short symbol for diagrams
    pub fn symbol(&self) -> &'static str {
        match self {
            SupportKind::Pinned => "△",
            SupportKind::Roller => "○",
            SupportKind::Fixed => "▣",
        }
    }
}

impl std::fmt::Display for SupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A support placed on the beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Unique identifier for this support
    pub id: Uuid,

    /// Support condition
    pub kind: SupportKind,

    /// Distance from the left end of the beam
    pub position: f64,

    /// Creation order across all supports and loads of a beam
    pub sequence: usize,
}

impl Support {
    /// Create a new support
    pub fn new(kind: SupportKind, position: f64, sequence: usize) -> Self {
        Support {
            id: Uuid::new_v4(),
            kind,
            position,
            sequence,
        }
    }
}

/// Direction of a solved reaction, as drawn by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionSense {
    Up,
    Down,
    None,
}

impl ReactionSense {
    /// Arrow for reports
    pub fn arrow(&self) -> &'static str {
        match self {
            ReactionSense::Up => "↑",
            ReactionSense::Down => "↓",
            ReactionSense::None => "·",
        }
    }
}

/// A support together with its solved reaction.
///
/// The original [`Support`] record is never modified; solving produces this
/// value instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedSupport {
    pub support: Support,

    /// Signed vertical reaction (+ = upward)
    pub reaction: f64,
}

impl SolvedSupport {
    pub fn position(&self) -> f64 {
        self.support.position
    }

    /// Which way the reaction arrow points
    pub fn sense(&self) -> ReactionSense {
        if self.reaction > 0.0 {
            ReactionSense::Up
        } else if self.reaction < 0.0 {
            ReactionSense::Down
        } else {
            ReactionSense::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_components() {
        assert_eq!(SupportKind::Pinned.reaction_components(), 1);
        assert_eq!(SupportKind::Roller.reaction_components(), 1);
        assert_eq!(SupportKind::Fixed.reaction_components(), 2);
    }

    #[test]
    fn test_default_is_pinned() {
        assert_eq!(SupportKind::default(), SupportKind::Pinned);
        assert_eq!(SupportKind::Roller.to_string(), "Roller");
    }

    #[test]
    fn test_reaction_sense() {
        let support = Support::new(SupportKind::Pinned, 0.0, 0);
        let up = SolvedSupport { support: support.clone(), reaction: 5.0 };
        let down = SolvedSupport { support, reaction: -2.0 };
        assert_eq!(up.sense(), ReactionSense::Up);
        assert_eq!(down.sense(), ReactionSense::Down);
        assert_eq!(down.sense().arrow(), "↓");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&SupportKind::Roller).unwrap();
        assert_eq!(json, "\"Roller\"");
        let parsed: SupportKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SupportKind::Roller);
    }
}
