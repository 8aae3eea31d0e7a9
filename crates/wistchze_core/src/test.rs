//! Tests for core helpers

use crate::interp::{interp_to, inverse_lerp, lerp};

#[test]
fn interp_to_approaches_without_overshoot() {
    let mut current = 0.;

    for _ in 0..120 {
        let next = interp_to(current, 100., 1. / 60., 3.);
        assert!(next >= current);
        assert!(next <= 100.);
        current = next;
    }

    // two seconds at rate 3 leaves e^-6 of the distance
    let expected = 100. - 100. * (-6f32).exp();
    assert!((current - expected).abs() < 0.01, "{current} vs {expected}");
}

#[test]
fn interp_to_is_frame_rate_independent() {
    let mut fine = 300.;
    for _ in 0..100 {
        fine = interp_to(fine, 75., 0.01, 2.);
    }

    let coarse = interp_to(300., 75., 1., 2.);

    assert!((fine - coarse).abs() < 0.01, "{fine} vs {coarse}");
}

#[test]
fn interp_to_edge_cases() {
    // no speed means no smoothing
    assert_eq!(interp_to(10., -3., 0.016, 0.), -3.);
    // already there
    assert_eq!(interp_to(5., 5., 0.016, 3.), 5.);
    // time never runs backwards
    assert_eq!(interp_to(1., 50., -1., 3.), 1.);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(300., 75., 0.), 300.);
    assert_eq!(lerp(300., 75., 1.), 75.);
    assert_eq!(lerp(300., 75., 0.5), 187.5);

    assert_eq!(inverse_lerp(0., 90., 45.), 0.5);
    assert_eq!(inverse_lerp(3., 3., 10.), 0.);
}
