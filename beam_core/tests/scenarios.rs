//! End-to-end beam scenarios with hand-checked answers.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use beam_core::calculations::NodeKind;
use beam_core::{Beam, BeamInput, CalcError, Direction, Orientation, SupportKind};

fn simple(span: f64) -> Beam {
    let mut beam = Beam::new(span).unwrap();
    beam.add_support(SupportKind::Pinned, 0.0).unwrap();
    beam.add_support(SupportKind::Roller, span).unwrap();
    beam
}

/// L = 12, uniform 6 down on [3, 6], 10 down at 9
fn mixed_loads() -> Beam {
    let mut beam = simple(12.0);
    beam.add_distributed_load(3.0, 6.0, 6.0, Direction::Down).unwrap();
    beam.add_point_load(9.0, 10.0, Direction::Down).unwrap();
    beam
}

#[test]
fn midspan_point_load() {
    let mut beam = simple(10.0);
    beam.add_point_load(5.0, 10.0, Direction::Down).unwrap();

    let (r1, r2) = beam.reactions().unwrap();
    assert_eq!((r1, r2), (5.0, 5.0));

    let shear = beam.shear_profile().unwrap();
    let values: Vec<f64> = shear.values().collect();
    assert_eq!(values.first(), Some(&0.0));
    assert_eq!(values[1], 5.0);
    assert_eq!(values.last(), Some(&0.0));
    assert_eq!(values[values.len() - 2], -5.0);

    // step at x = 5: two samples at the same position
    let at_five: Vec<f64> = shear
        .points
        .iter()
        .filter(|p| p.0 == 5.0)
        .map(|p| p.1)
        .collect();
    assert_eq!(at_five, vec![5.0, -5.0]);

    let results = beam.analyze().unwrap();
    assert_relative_eq!(results.max_moment, 25.0, epsilon = 1e-12);
    assert_relative_eq!(results.max_moment_position, 5.0, epsilon = 1e-12);
}

#[test]
fn mixed_loads_reactions_balance() {
    let beam = mixed_loads();
    let (r1, r2) = beam.reactions().unwrap();

    assert_relative_eq!(r1 + r2, 28.0, epsilon = 1e-12);
    // R2 = (18 * 4.5 + 10 * 9) / 12
    assert_relative_eq!(r2, 14.25, epsilon = 1e-12);
    assert_relative_eq!(r1, 13.75, epsilon = 1e-12);

    let reactions = beam.solve().unwrap();
    let loads = beam.equivalent_loads();
    assert_abs_diff_eq!(reactions.moment_residual(&loads, 0.0), 0.0, epsilon = 1e-9);
}

#[test]
fn mixed_loads_segment_offsets() {
    let beam = mixed_loads();
    let segments = beam.segments().unwrap();
    assert_eq!(segments.len(), 4);

    let mut preceding = 0.0;
    for segment in segments {
        assert_relative_eq!(segment.offset, preceding, epsilon = 1e-12);
        preceding += segment.length;
    }
}

#[test]
fn mixed_loads_shear_and_moment() {
    let beam = mixed_loads();

    assert_relative_eq!(beam.shear_at(1.0).unwrap(), 13.75, epsilon = 1e-12);
    assert_relative_eq!(beam.shear_at(4.0).unwrap(), 13.75 - 6.0, epsilon = 1e-12);
    assert_relative_eq!(beam.shear_at(7.0).unwrap(), 13.75 - 18.0, epsilon = 1e-12);
    assert_relative_eq!(beam.shear_at(10.0).unwrap(), -14.25, epsilon = 1e-12);

    // M(9) from the right: R2 * 3
    assert_relative_eq!(beam.moment_at(9.0).unwrap(), 14.25 * 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(beam.moment_at(0.0).unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(beam.moment_at(12.0).unwrap(), 0.0, epsilon = 1e-9);

    let moment = beam.moment_profile().unwrap();
    assert_eq!(moment.points.first(), Some(&(0.0, 0.0)));
    let last = moment.points.last().unwrap();
    assert_eq!(last.0, 12.0);
    assert_abs_diff_eq!(last.1, 0.0, epsilon = 1e-9);
}

#[test]
fn shear_jumps_by_net_load() {
    let beam = mixed_loads();
    let h = 1e-9;
    for node in beam.nodes().unwrap() {
        if !node.kind.is_step() || node.position == 0.0 || node.position == 12.0 {
            continue;
        }
        let left = beam.shear_at(node.position - h).unwrap();
        let right = beam.shear_at(node.position).unwrap();
        assert_relative_eq!(right - left, node.net_load, epsilon = 1e-6);
    }
}

#[test]
fn moment_slope_matches_shear() {
    let mut beam = simple(10.0);
    beam.add_triangular_load(1.0, 6.0, 4.0, Orientation::Descending, Direction::Down)
        .unwrap();
    beam.add_trapezoidal_load(5.0, 9.0, 1.0, 3.0, Direction::Up).unwrap();
    beam.add_point_load(7.5, 2.0, Direction::Down).unwrap();

    let shear = beam.shear_pieces().unwrap();
    let moment = beam.moment_pieces().unwrap();
    let h = 1e-5;
    for x in [0.5, 2.0, 3.3, 5.5, 6.7, 8.2, 9.6] {
        let slope = (moment.value_at(x + h) - moment.value_at(x - h)) / (2.0 * h);
        assert_relative_eq!(slope, shear.value_at(x), epsilon = 1e-5);
    }
}

#[test]
fn support_and_point_load_merge() {
    let mut beam = Beam::new(10.0).unwrap();
    beam.add_support(SupportKind::Pinned, 0.0).unwrap();
    beam.add_support(SupportKind::Roller, 6.0).unwrap();
    beam.add_point_load(6.0, 5.0, Direction::Down).unwrap();
    beam.add_point_load(10.0, 3.0, Direction::Down).unwrap();

    let nodes = beam.nodes().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[1].kind, NodeKind::SupportAndLoad);

    // R2 = (5 * 6 + 3 * 10) / 6 = 10, R1 = -2
    let (r1, r2) = beam.reactions().unwrap();
    assert_relative_eq!(r1, -2.0, epsilon = 1e-12);
    assert_relative_eq!(r2, 10.0, epsilon = 1e-12);
    assert_relative_eq!(nodes[1].net_load, 5.0, epsilon = 1e-12);

    // cantilevered overhang: hogging moment over the support
    assert_relative_eq!(beam.moment_at(6.0).unwrap(), -12.0, epsilon = 1e-9);
}

#[test]
fn shear_jumps_by_merged_net_load() {
    let mut beam = Beam::new(10.0).unwrap();
    beam.add_support(SupportKind::Pinned, 0.0).unwrap();
    beam.add_support(SupportKind::Roller, 6.0).unwrap();
    beam.add_point_load(6.0, 5.0, Direction::Down).unwrap();
    beam.add_point_load(10.0, 3.0, Direction::Down).unwrap();

    let nodes = beam.nodes().unwrap();
    let merged = nodes
        .iter()
        .find(|n| n.kind == NodeKind::SupportAndLoad)
        .unwrap();
    assert_eq!(merged.position, 6.0);

    let h = 1e-9;
    let left = beam.shear_at(merged.position - h).unwrap();
    let right = beam.shear_at(merged.position).unwrap();
    assert_relative_eq!(left, -2.0, epsilon = 1e-9);
    assert_relative_eq!(right, 3.0, epsilon = 1e-9);
    assert_relative_eq!(right - left, merged.net_load, epsilon = 1e-9);

    // both samples of the step are in the profile
    let shear = beam.shear_profile().unwrap();
    let at_six: Vec<f64> = shear
        .points
        .iter()
        .filter(|p| p.0 == 6.0)
        .map(|p| p.1)
        .collect();
    assert_eq!(at_six.len(), 2);
    assert_relative_eq!(at_six[1] - at_six[0], merged.net_load, epsilon = 1e-12);
}

#[test]
fn loads_ending_at_the_free_end() {
    // overhang [8, 10]: uniform 1 down on [6, 10] and 2 down at the tip
    let mut beam = Beam::new(10.0).unwrap();
    beam.add_support(SupportKind::Pinned, 0.0).unwrap();
    beam.add_support(SupportKind::Roller, 8.0).unwrap();
    beam.add_distributed_load(6.0, 10.0, 1.0, Direction::Down).unwrap();
    beam.add_point_load(10.0, 2.0, Direction::Down).unwrap();

    // R2 = (4 * 8 + 2 * 10) / 8
    let (r1, r2) = beam.reactions().unwrap();
    assert_relative_eq!(r2, 6.5, epsilon = 1e-12);
    assert_relative_eq!(r1, -0.5, epsilon = 1e-12);

    let positions: Vec<f64> = beam.nodes().unwrap().iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![0.0, 6.0, 8.0, 10.0, 10.0]);

    // just left of the tip only the tip load remains to the right
    let shear = beam.shear_profile().unwrap();
    let n = shear.points.len();
    let (x_before, v_before) = shear.points[n - 2];
    let (x_last, v_last) = shear.points[n - 1];
    assert_eq!(x_before, 10.0);
    assert_relative_eq!(v_before, 2.0, epsilon = 1e-9);
    assert_eq!(x_last, 10.0);
    assert_abs_diff_eq!(v_last, 0.0, epsilon = 1e-9);

    assert_abs_diff_eq!(beam.moment_at(10.0).unwrap(), 0.0, epsilon = 1e-9);
    let moment = beam.moment_profile().unwrap();
    let (x_end, m_end) = *moment.points.last().unwrap();
    assert_eq!(x_end, 10.0);
    assert_abs_diff_eq!(m_end, 0.0, epsilon = 1e-9);
}

#[test]
fn support_outside_span() {
    let mut beam = Beam::new(10.0).unwrap();
    let err = beam.add_support(SupportKind::Pinned, -1.0).unwrap_err();
    assert!(matches!(err, CalcError::InvalidSupportPosition { .. }));
    assert_eq!(err.error_code(), "INVALID_SUPPORT_POSITION");
}

#[test]
fn three_supports_are_indeterminate() {
    let mut beam = simple(10.0);
    beam.add_support(SupportKind::Roller, 4.0).unwrap();
    beam.add_point_load(2.0, 10.0, Direction::Down).unwrap();

    let err = beam.analyze().unwrap_err();
    assert!(matches!(err, CalcError::IndeterminateConfiguration { .. }));
}

#[test]
fn json_input_round_trip_through_analysis() {
    let json = r#"{
        "label": "B-2",
        "span": 10.0,
        "supports": [
            { "kind": "Roller", "position": 10.0 },
            { "kind": "Pinned", "position": 0.0 }
        ],
        "loads": [
            { "type": "Triangular", "start": 0.0, "end": 10.0, "peak": 3.0, "orientation": "Ascending" }
        ],
        "settings": { "dense_samples": 21 }
    }"#;
    let beam = Beam::from_input(&BeamInput::from_json(json).unwrap()).unwrap();
    let results = beam.analyze().unwrap();

    // wL/6 and wL/3
    assert_relative_eq!(results.reaction_left, 5.0, epsilon = 1e-12);
    assert_relative_eq!(results.reaction_right, 10.0, epsilon = 1e-12);

    // Mmax = wL²/(9√3) at x = L/√3; the sampled peak is within one grid step
    let exact = 3.0 * 100.0 / (9.0 * 3.0_f64.sqrt());
    assert!(results.max_moment <= exact + 1e-9);
    assert!(results.max_moment > 0.99 * exact);

    let text = serde_json::to_string(&results).unwrap();
    assert!(text.contains("shear_diagram"));
}
