//! Reaction solver
//!
//! Closed-form solution of the two global equilibrium equations for a beam on
//! two single-component supports:
//!
//! ```text
//! ΣM about x₁ = 0  ->  R₂ = -Σ Fᵢ·(xᵢ - x₁) / (x₂ - x₁)
//! ΣFy = 0          ->  R₁ = -Σ Fᵢ - R₂
//! ```
//!
//! Supports are sorted by position first, so `R₁` always belongs to the
//! leftmost support regardless of the order they were added in.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::EquivalentLoad;
use crate::settings::AnalysisSettings;
use crate::supports::{SolvedSupport, Support};

/// Solved reactions, leftmost support first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub left: SolvedSupport,
    pub right: SolvedSupport,
}

impl Reactions {
    /// `(left, right)` signed reactions
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.left.reaction, self.right.reaction)
    }

    /// The reactions as point forces at the support positions
    pub fn as_point_forces(&self) -> [EquivalentLoad; 2] {
        [&self.left, &self.right].map(|s| EquivalentLoad {
            force: s.reaction,
            position: s.position(),
        })
    }

    /// Σ reactions + Σ loads
    pub fn force_residual(&self, loads: &[EquivalentLoad]) -> f64 {
        self.as_point_forces()
            .iter()
            .chain(loads)
            .map(|f| f.force)
            .sum()
    }

    /// Σ moments of reactions and loads about `point`
    pub fn moment_residual(&self, loads: &[EquivalentLoad], point: f64) -> f64 {
        self.as_point_forces()
            .iter()
            .chain(loads)
            .map(|f| f.moment_about(point))
            .sum()
    }
}

/// Check that the supports form a statically determinate set.
pub fn check_determinate(supports: &[Support], settings: &AnalysisSettings) -> CalcResult<()> {
    if supports.len() != 2 {
        return Err(CalcError::indeterminate(format!(
            "beam has {} supports, exactly two single-reaction supports are required",
            supports.len()
        )));
    }

    if let Some(fixed) = supports.iter().find(|s| s.kind.reaction_components() != 1) {
        return Err(CalcError::indeterminate(format!(
            "{} support at {} provides {} reaction components",
            fixed.kind,
            fixed.position,
            fixed.kind.reaction_components()
        )));
    }

    let (a, b) = (supports[0].position, supports[1].position);
    if (b - a).abs() <= settings.position_tolerance {
        return Err(CalcError::overlapping(a, "two supports share one position"));
    }
    Ok(())
}

/// Solve the reactions of two supports under the given equivalent loads.
pub fn solve(
    supports: &[Support],
    loads: &[EquivalentLoad],
    settings: &AnalysisSettings,
) -> CalcResult<Reactions> {
    check_determinate(supports, settings)?;

    let mut ordered = supports.to_vec();
    ordered.sort_by(|a, b| a.position.total_cmp(&b.position));
    let (first, second) = (ordered[0].clone(), ordered[1].clone());

    let x1 = first.position;
    let lever = second.position - x1;

    let total_force: f64 = loads.iter().map(|l| l.force).sum();
    let moment_about_first: f64 = loads.iter().map(|l| l.moment_about(x1)).sum();

    let r2 = -moment_about_first / lever;
    let r1 = -total_force - r2;

    let reactions = Reactions {
        left: SolvedSupport {
            support: first,
            reaction: r1,
        },
        right: SolvedSupport {
            support: second,
            reaction: r2,
        },
    };

    log::debug!(
        "solved reactions: R1 = {:.6} at {}, R2 = {:.6} at {}",
        r1,
        reactions.left.position(),
        r2,
        reactions.right.position()
    );

    let force_residual = reactions.force_residual(loads);
    let moment_residual = reactions.moment_residual(loads, 0.0);
    let scale = 1.0 + loads.iter().map(|l| l.force.abs()).sum::<f64>();
    if force_residual.abs() > settings.equilibrium_tolerance * scale
        || moment_residual.abs() > settings.equilibrium_tolerance * scale * (1.0 + lever.abs())
    {
        log::warn!(
            "equilibrium residuals above tolerance: force {:e}, moment {:e}",
            force_residual,
            moment_residual
        );
    }

    Ok(reactions)
}
