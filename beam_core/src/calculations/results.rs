//! Sampled diagrams and analysis results
//!
//! The renderer consumes plain `(position, value)` sequences. Sampling follows
//! the shape of each piece:
//!
//! - shear on a constant piece: one sample per `coarse_step` (integer positions
//!   by default) plus both ends
//! - shear on a sloped/curved piece, and every moment piece: `dense_samples`
//!   evenly spaced points including both ends
//!
//! Since every piece emits both of its ends, a step in shear shows up as two
//! samples at the same position.

use serde::{Deserialize, Serialize};

use crate::calculations::accumulator::{Piece, Piecewise, Response};
use crate::calculations::reactions::Reactions;
use crate::settings::AnalysisSettings;

/// Coefficients below this magnitude count as zero when deciding whether a
/// shear piece is flat
const FLAT_TOLERANCE: f64 = 1e-12;

/// Sampled values along the beam for plotting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagram {
    pub points: Vec<(f64, f64)>,
}

impl Diagram {
    /// Append a point, skipping exact repeats of the previous one
    pub fn push(&mut self, x: f64, value: f64) {
        if self.points.last() != Some(&(x, value)) {
            self.points.push((x, value));
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.1)
    }

    /// Largest value and its position (first occurrence)
    pub fn max(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best, p| match best {
                Some((_, v)) if v >= p.1 => best,
                _ => Some(p),
            })
    }

    /// Smallest value and its position (first occurrence)
    pub fn min(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best, p| match best {
                Some((_, v)) if v <= p.1 => best,
                _ => Some(p),
            })
    }

    /// Largest magnitude and its position
    pub fn max_abs(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best, p| match best {
                Some((_, v)) if v.abs() >= p.1.abs() => best,
                _ => Some(p),
            })
    }
}

impl Piecewise {
    /// Sample the function into a diagram.
    ///
    /// Starts with the value at the left end before any node acts and ends
    /// with the closing value at the right end.
    pub fn sample(&self, settings: &AnalysisSettings) -> Diagram {
        let mut diagram = Diagram::default();
        diagram.push(0.0, 0.0);

        for piece in &self.pieces {
            if piece.length() <= settings.position_tolerance {
                continue;
            }
            let dense = match self.response {
                Response::Shear => !piece.poly.is_constant(FLAT_TOLERANCE),
                Response::Moment => true,
            };
            let grid = if dense {
                dense_grid(piece, settings.dense_samples)
            } else {
                coarse_grid(piece, settings.coarse_step, settings.position_tolerance)
            };
            for x in grid {
                diagram.push(x, piece.eval_at(x));
            }
        }

        diagram.push(self.span, self.closing_value());
        log::trace!("sampled {:?} diagram: {} points", self.response, diagram.points.len());
        diagram
    }
}

fn dense_grid(piece: &Piece, samples: usize) -> Vec<f64> {
    let n = samples.max(2);
    let step = piece.length() / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { piece.end } else { piece.start + step * i as f64 })
        .collect()
}

fn coarse_grid(piece: &Piece, step: f64, tolerance: f64) -> Vec<f64> {
    let mut grid = vec![piece.start];
    let mut k = ((piece.start + tolerance) / step).floor() + 1.0;
    while k * step < piece.end - tolerance {
        grid.push(k * step);
        k += 1.0;
    }
    grid.push(piece.end);
    grid
}

/// Results from a beam analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Left support reaction - positive upward
    pub reaction_left: f64,
    /// Right support reaction - positive upward
    pub reaction_right: f64,

    /// Supports with their solved reactions, leftmost first
    pub reactions: Reactions,

    /// Maximum shear magnitude
    pub max_shear: f64,
    /// Position of maximum shear magnitude
    pub max_shear_position: f64,

    /// Maximum (most positive) moment
    pub max_moment: f64,
    /// Position of maximum moment
    pub max_moment_position: f64,

    /// Minimum (most negative) moment
    pub min_moment: f64,
    /// Position of minimum moment
    pub min_moment_position: f64,

    /// Node positions, left to right
    pub node_positions: Vec<f64>,

    /// Sampled shear values along beam for plotting
    pub shear_diagram: Diagram,
    /// Sampled moment values along beam for plotting
    pub moment_diagram: Diagram,
}

impl AnalysisResults {
    pub fn new(
        reactions: Reactions,
        node_positions: Vec<f64>,
        shear_diagram: Diagram,
        moment_diagram: Diagram,
    ) -> Self {
        let (max_shear_position, max_shear) = shear_diagram.max_abs().unwrap_or((0.0, 0.0));
        let (max_moment_position, max_moment) = moment_diagram.max().unwrap_or((0.0, 0.0));
        let (min_moment_position, min_moment) = moment_diagram.min().unwrap_or((0.0, 0.0));
        let (reaction_left, reaction_right) = reactions.as_tuple();

        AnalysisResults {
            reaction_left,
            reaction_right,
            reactions,
            max_shear: max_shear.abs(),
            max_shear_position,
            max_moment,
            max_moment_position,
            min_moment,
            min_moment_position,
            node_positions,
            shear_diagram,
            moment_diagram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::polynomial::Polynomial;

    fn piece(start: f64, end: f64, poly: Polynomial) -> Piece {
        Piece {
            segment: Some(0),
            start,
            end,
            offset: start,
            poly,
        }
    }

    #[test]
    fn test_coarse_grid_integer_positions() {
        let p = piece(0.0, 5.0, Polynomial::constant(1.0));
        assert_eq!(coarse_grid(&p, 1.0, 1e-9), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let p = piece(2.5, 4.2, Polynomial::constant(1.0));
        assert_eq!(coarse_grid(&p, 1.0, 1e-9), vec![2.5, 3.0, 4.0, 4.2]);
    }

    #[test]
    fn test_dense_grid_includes_ends() {
        let p = piece(3.0, 6.0, Polynomial::linear(0.0, 1.0));
        let grid = dense_grid(&p, 100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 3.0);
        assert_eq!(grid[99], 6.0);
    }

    #[test]
    fn test_sample_shear_step() {
        let f = Piecewise {
            response: Response::Shear,
            span: 4.0,
            pieces: vec![
                piece(0.0, 2.0, Polynomial::constant(3.0)),
                piece(2.0, 4.0, Polynomial::constant(-3.0)),
                Piece {
                    segment: None,
                    start: 4.0,
                    end: 4.0,
                    offset: 4.0,
                    poly: Polynomial::ZERO,
                },
            ],
        };
        let d = f.sample(&AnalysisSettings::default());
        assert_eq!(
            d.points,
            vec![
                (0.0, 0.0),
                (0.0, 3.0),
                (1.0, 3.0),
                (2.0, 3.0),
                (2.0, -3.0),
                (3.0, -3.0),
                (4.0, -3.0),
                (4.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_diagram_extremes() {
        let d = Diagram {
            points: vec![(0.0, 0.0), (1.0, 4.0), (2.0, -6.0), (3.0, 4.0)],
        };
        assert_eq!(d.max(), Some((1.0, 4.0)));
        assert_eq!(d.min(), Some((2.0, -6.0)));
        assert_eq!(d.max_abs(), Some((2.0, -6.0)));
        assert_eq!(Diagram::default().max(), None);
    }

    #[test]
    fn test_push_skips_repeats() {
        let mut d = Diagram::default();
        d.push(0.0, 1.0);
        d.push(0.0, 1.0);
        d.push(0.0, 2.0);
        assert_eq!(d.points, vec![(0.0, 1.0), (0.0, 2.0)]);
    }
}
