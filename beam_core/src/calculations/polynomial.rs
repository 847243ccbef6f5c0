//! Cubic polynomials in a single local coordinate.
//!
//! Internal-force terms on a statically determinate beam never exceed third
//! order (triangular load → cubic moment), so a fixed array of four
//! coefficients is enough to represent every running expression exactly.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// `c0 + c1·ξ + c2·ξ² + c3·ξ³`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial {
    coeffs: [f64; 4],
}

impl Polynomial {
    pub const ZERO: Polynomial = Polynomial { coeffs: [0.0; 4] };

    pub fn new(coeffs: [f64; 4]) -> Self {
        Polynomial { coeffs }
    }

    pub fn constant(c0: f64) -> Self {
        Polynomial::new([c0, 0.0, 0.0, 0.0])
    }

    pub fn linear(c0: f64, c1: f64) -> Self {
        Polynomial::new([c0, c1, 0.0, 0.0])
    }

    pub fn coeffs(&self) -> [f64; 4] {
        self.coeffs
    }

    /// Evaluate at `xi` (Horner)
    pub fn eval(&self, xi: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coeffs;
        ((c3 * xi + c2) * xi + c1) * xi + c0
    }

    /// Re-base onto a coordinate origin moved by `delta`.
    ///
    /// Returns `q` with `q(ξ) = p(ξ + delta)`.
    pub fn shifted(&self, delta: f64) -> Self {
        let [c0, c1, c2, c3] = self.coeffs;
        let d = delta;
        Polynomial::new([
            c0 + d * (c1 + d * (c2 + d * c3)),
            c1 + d * (2.0 * c2 + 3.0 * d * c3),
            c2 + 3.0 * d * c3,
            c3,
        ])
    }

    pub fn derivative(&self) -> Self {
        let [_, c1, c2, c3] = self.coeffs;
        Polynomial::new([c1, 2.0 * c2, 3.0 * c3, 0.0])
    }

    /// Highest power with a coefficient larger than `tolerance` in magnitude.
    /// The zero polynomial has degree 0.
    pub fn degree(&self, tolerance: f64) -> usize {
        (1..4)
            .rev()
            .find(|&k| self.coeffs[k].abs() > tolerance)
            .unwrap_or(0)
    }

    pub fn is_constant(&self, tolerance: f64) -> bool {
        self.degree(tolerance) == 0
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        let mut coeffs = self.coeffs;
        for (c, r) in coeffs.iter_mut().zip(rhs.coeffs) {
            *c += r;
        }
        Polynomial::new(coeffs)
    }
}

impl Sum for Polynomial {
    fn sum<I: Iterator<Item = Polynomial>>(iter: I) -> Polynomial {
        iter.fold(Polynomial::ZERO, Add::add)
    }
}
