//! Equivalent point loads
//!
//! Every load shape reduced to a single resultant acting at its centroid.
//! Used only for the two global equilibrium equations; the shear/moment
//! accumulator always works from the original load shapes.

use serde::{Deserialize, Serialize};

use super::AppliedLoad;

/// Resultant force and its line of action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalentLoad {
    /// Signed force (+ = upward)
    pub force: f64,
    /// Distance from the left end of the beam
    pub position: f64,
}

impl EquivalentLoad {
    /// Moment of this force about `point` (+ = counterclockwise)
    pub fn moment_about(&self, point: f64) -> f64 {
        self.force * (self.position - point)
    }
}

/// Reduce each load to one equivalent point load, in input order.
pub fn reduce(loads: &[AppliedLoad]) -> Vec<EquivalentLoad> {
    loads
        .iter()
        .map(|entry| EquivalentLoad {
            force: entry.load.resultant(),
            position: entry.load.centroid(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{Direction, Load, Orientation};
    use approx::assert_relative_eq;

    fn applied(loads: Vec<Load>) -> Vec<AppliedLoad> {
        loads
            .into_iter()
            .enumerate()
            .map(|(i, load)| AppliedLoad::new(load, i))
            .collect()
    }

    #[test]
    fn test_point_load_unchanged() {
        let eq = reduce(&applied(vec![Load::point(5.0, 10.0, Direction::Down)]));
        assert_eq!(eq, vec![EquivalentLoad { force: -10.0, position: 5.0 }]);
    }

    #[test]
    fn test_one_equivalent_per_load_in_order() {
        let eq = reduce(&applied(vec![
            Load::distributed(3.0, 6.0, 6.0, Direction::Down),
            Load::triangular(0.0, 3.0, 4.0, Orientation::Descending, Direction::Up),
            Load::trapezoidal(0.0, 6.0, 2.0, 2.0, Direction::Down),
        ]));

        assert_eq!(eq.len(), 3);
        assert_relative_eq!(eq[0].force, -18.0);
        assert_relative_eq!(eq[0].position, 4.5);
        assert_relative_eq!(eq[1].force, 6.0);
        assert_relative_eq!(eq[1].position, 1.0);
        assert_relative_eq!(eq[2].force, -12.0);
        assert_relative_eq!(eq[2].position, 3.0);
    }

    #[test]
    fn test_reduction_leaves_originals_untouched() {
        let loads = applied(vec![Load::distributed(0.0, 4.0, 1.0, Direction::Down)]);
        let before = loads.clone();
        let _ = reduce(&loads);
        assert_eq!(loads, before);
    }

    #[test]
    fn test_moment_about() {
        let eq = EquivalentLoad { force: -10.0, position: 5.0 };
        assert_relative_eq!(eq.moment_about(0.0), -50.0);
        assert_relative_eq!(eq.moment_about(5.0), 0.0);
    }
}
