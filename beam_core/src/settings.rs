//! # Analysis Settings
//!
//! Knobs that control how the piecewise internal-force functions are sampled
//! and how strictly positions and equilibrium are compared. Defaults match the
//! diagram density a renderer expects (100 points across curved regions, one
//! point per unit length across flat ones).
//!
//! ## JSON Format
//! ```json
//! {
//!   "dense_samples": 100,
//!   "coarse_step": 1.0,
//!   "position_tolerance": 1e-9,
//!   "equilibrium_tolerance": 1e-6
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Sampling and tolerance settings for a beam analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Number of samples across a segment whose expression is not constant
    pub dense_samples: usize,

    /// Spacing of samples across a segment whose expression is constant
    pub coarse_step: f64,

    /// Two positions closer than this are treated as the same position
    pub position_tolerance: f64,

    /// Largest acceptable force / moment residual after solving reactions
    pub equilibrium_tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            dense_samples: 100,
            coarse_step: 1.0,
            position_tolerance: 1e-9,
            equilibrium_tolerance: 1e-6,
        }
    }
}

impl AnalysisSettings {
    /// Set the dense sample count (builder pattern)
    pub fn with_dense_samples(mut self, samples: usize) -> Self {
        self.dense_samples = samples;
        self
    }

    /// Set the coarse sample step (builder pattern)
    pub fn with_coarse_step(mut self, step: f64) -> Self {
        self.coarse_step = step;
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> CalcResult<()> {
        if self.dense_samples < 2 {
            return Err(CalcError::invalid_input(
                "dense_samples",
                self.dense_samples.to_string(),
                "At least two samples are needed to span a segment",
            ));
        }
        if !(self.coarse_step.is_finite() && self.coarse_step > 0.0) {
            return Err(CalcError::invalid_input(
                "coarse_step",
                self.coarse_step.to_string(),
                "Step must be positive",
            ));
        }
        for (field, value) in [
            ("position_tolerance", self.position_tolerance),
            ("equilibrium_tolerance", self.equilibrium_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Tolerance must be non-negative",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.dense_samples, 100);
        assert_eq!(settings.coarse_step, 1.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(AnalysisSettings::default().with_dense_samples(1).validate().is_err());
        assert!(AnalysisSettings::default().with_coarse_step(0.0).validate().is_err());
        assert!(AnalysisSettings::default()
            .with_coarse_step(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: AnalysisSettings = serde_json::from_str(r#"{"dense_samples": 20}"#).unwrap();
        assert_eq!(settings.dense_samples, 20);
        assert_eq!(settings.coarse_step, 1.0);
    }
}
