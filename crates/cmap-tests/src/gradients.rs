//! Gradient engine properties.

use crate::{random_srgb, rng};
use cmap_gradient::{
    ColorGradient, Evaluator, GradientConfig, NearestPointSolver, WeightSpace, determine_weights, presets,
    sort_by_hue,
};
use cmap_math::Vec3;
use cmap_space::{ColorSpaceType, Illuminant, Observer};
use rand::Rng;

/// Residual sum of squares the default fit must stay below.
const FIT_RSS_THRESHOLD: f64 = 1.5;

fn weight_spaces() -> impl Iterator<Item = WeightSpace> {
    std::iter::once(WeightSpace::Unweighted).chain(ColorSpaceType::ALL.into_iter().map(WeightSpace::Space))
}

#[test]
fn test_weights_strictly_increasing() {
    let mut rng = rng(42);
    for space in weight_spaces() {
        for _ in 0..20 {
            let n = rng.random_range(2..10);
            let anchors: Vec<Vec3> = (0..n).map(|_| random_srgb(&mut rng)).collect();
            let w = determine_weights(&anchors, space, true, Observer::Cie1931, Illuminant::D65).unwrap();
            assert_eq!(w.len(), n);
            assert_eq!(w[0], 0.0, "{space}");
            assert!(w.iter().all(|&x| (0.0..1.0).contains(&x)), "{space}: {w:?}");
            assert!(w.windows(2).all(|p| p[0] < p[1]), "{space}: {w:?}");
        }
    }
}

#[test]
fn test_repeated_anchors_keep_weight_invariant() {
    let a = Vec3::new(0.15, 0.18, 0.26);
    let b = Vec3::new(0.58, 0.23, 0.22);
    for anchors in [vec![a, b, a], vec![a, a, b], vec![a, b, b, a]] {
        let g = ColorGradient::new("repeat", anchors.clone(), GradientConfig::default()).unwrap();
        let w = g.weights();
        assert_eq!(w[0], 0.0);
        assert!(w.iter().all(|&x| (0.0..1.0).contains(&x)), "{anchors:?}: {w:?}");
        assert!(w.windows(2).all(|p| p[0] < p[1]), "{anchors:?}: {w:?}");
        for (&t, &anchor) in w.iter().zip(&anchors) {
            assert!(g.evaluate(t).max_abs_diff(anchor) < 1e-6, "{anchors:?} at t = {t}");
        }
    }
}

#[test]
fn test_open_weights_end_at_one() {
    let mut rng = rng(43);
    for space in weight_spaces() {
        let anchors: Vec<Vec3> = (0..5).map(|_| random_srgb(&mut rng)).collect();
        let w = determine_weights(&anchors, space, false, Observer::Cie1931, Illuminant::D65).unwrap();
        assert_eq!(w[0], 0.0);
        assert_eq!(w[4], 1.0, "{space}");
        assert!(w.windows(2).all(|p| p[0] < p[1]), "{space}: {w:?}");
    }
}

#[test]
fn test_evaluator_continuous_at_anchors() {
    const EPS: f64 = 1e-9;
    let mut rng = rng(44);
    let mix_spaces = [
        ColorSpaceType::Srgb,
        ColorSpaceType::Rgb,
        ColorSpaceType::OkLab,
        ColorSpaceType::CieLab,
        ColorSpaceType::CieLuv,
        ColorSpaceType::AcesAp1,
        ColorSpaceType::HunterLab,
        ColorSpaceType::YCbCr,
    ];
    for mix in mix_spaces {
        let anchors: Vec<Vec3> = (0..6).map(|_| random_srgb(&mut rng)).collect();
        let weights =
            determine_weights(&anchors, WeightSpace::default(), true, Observer::Cie1931, Illuminant::D65).unwrap();
        let evaluator =
            Evaluator::new(&anchors, &weights, mix, true, Observer::Cie1931, Illuminant::D65).unwrap();

        for (i, (&w, &anchor)) in weights.iter().zip(&anchors).enumerate() {
            let below = evaluator.evaluate(w - EPS);
            let above = evaluator.evaluate(w + EPS);
            assert!(below.max_abs_diff(anchor) < 1e-6, "{mix} anchor {i}: below {below:?} vs {anchor:?}");
            assert!(above.max_abs_diff(anchor) < 1e-6, "{mix} anchor {i}: above {above:?} vs {anchor:?}");
        }
    }
}

#[test]
fn test_fit_quality_of_presets() {
    for g in presets::all().unwrap() {
        let config = g.config();
        assert_eq!(config.degree, 6);
        assert_eq!(config.weight_space, WeightSpace::Space(ColorSpaceType::OkLab));
        assert_eq!(config.mix_space, ColorSpaceType::OkLab);
        assert_eq!(g.anchors().len(), 8);

        let t = cmap_math::linspace(0.0, 1.0, 256);
        let rss = g.curve().residual_against(|t| g.evaluate(t), &t);
        assert!(rss < FIT_RSS_THRESHOLD, "{}: residual {rss}", g.name());

        let reported = g.quality().unwrap().residual;
        assert!((rss - reported).abs() < 1e-9, "{}: {rss} vs {reported}", g.name());
    }
}

#[test]
fn test_refit_is_reproducible() {
    let a = presets::ocean_sunset().unwrap();
    let b = ColorGradient::new("copy", a.anchors().to_vec(), *a.config()).unwrap();
    assert_eq!(a.weights(), b.weights());
    assert_eq!(a.coefficients(), b.coefficients());
}

#[test]
fn test_nearest_point_idempotent() {
    for g in presets::all().unwrap() {
        for t0 in [0.0, 0.25, 0.5, 0.75] {
            let target = g.evaluate_fit(t0);
            let found = g.nearest_weight(target).unwrap();
            let back = g.evaluate_fit(found.t);
            assert!(
                back.max_abs_diff(target) < 1e-2,
                "{} t0 = {t0}: found t = {} with {back:?} vs {target:?}",
                g.name(),
                found.t
            );
        }
    }
}

#[test]
fn test_nearest_point_off_grid() {
    // Parameters the coarse scan does not hit exactly
    let g = presets::warm_dusk().unwrap();
    let solver = NearestPointSolver::default();
    for t0 in [0.11, 0.37, 0.62, 0.83] {
        let target = g.evaluate_fit(t0);
        let found = solver.solve(g.curve(), target).unwrap();
        assert!(found.distance < 1e-3, "t0 = {t0}: {found:?}");
    }
}

#[test]
fn test_hue_sort_stable() {
    let mut rng = rng(45);
    for _ in 0..20 {
        let palette: Vec<Vec3> = (0..8).map(|_| random_srgb(&mut rng)).collect();
        let once = sort_by_hue(&palette, ColorSpaceType::Srgb).unwrap();
        let twice = sort_by_hue(&once, ColorSpaceType::Srgb).unwrap();
        assert_eq!(once, twice);

        // Any rotation of a sorted palette sorts back to the same order
        let mut rotated = once.clone();
        rotated.rotate_left(3);
        assert_eq!(sort_by_hue(&rotated, ColorSpaceType::Srgb).unwrap(), once);
    }
}

#[test]
fn test_hue_sort_other_source_space() {
    let mut rng = rng(46);
    let srgb: Vec<Vec3> = (0..6).map(|_| random_srgb(&mut rng)).collect();
    let lab: Vec<Vec3> = srgb
        .iter()
        .map(|&c| {
            cmap_space::convert(c, ColorSpaceType::Srgb, ColorSpaceType::CieLab, Observer::Cie1931, Illuminant::D65)
                .unwrap()
        })
        .collect();
    let sorted = sort_by_hue(&lab, ColorSpaceType::CieLab).unwrap();
    assert_eq!(sorted.len(), 6);
    // Smallest Lab vector leads
    let min = lab.iter().map(|c| c.length()).fold(f64::INFINITY, f64::min);
    assert_eq!(sorted[0].length(), min);
}

#[test]
fn test_rgb_end_to_end() {
    let red = Vec3::new(1.0, 0.0, 0.0);
    let green = Vec3::new(0.0, 1.0, 0.0);
    let blue = Vec3::new(0.0, 0.0, 1.0);
    let g = ColorGradient::new(
        "rgb",
        vec![red, green, blue],
        GradientConfig {
            weight_space: WeightSpace::Unweighted,
            mix_space: ColorSpaceType::Rgb,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(g.weights(), &[0.0, 1.0 / 3.0, 2.0 / 3.0]);
    for (t, expected) in [(0.0, red), (1.0 / 3.0, green), (2.0 / 3.0, blue), (1.0, red)] {
        let c = g.evaluate(t);
        assert!(c.max_abs_diff(expected) < 1e-9, "t = {t}: {c:?} vs {expected:?}");
    }
}

#[test]
fn test_palette_to_gradient() {
    // Extracted palette -> hue order -> anchors
    let mut rng = rng(47);
    let palette: Vec<Vec3> = (0..5).map(|_| random_srgb(&mut rng)).collect();
    let mut g = presets::warm_dusk().unwrap();
    g.replace_anchors(sort_by_hue(&palette, ColorSpaceType::Srgb).unwrap()).unwrap();
    assert_eq!(g.anchors().len(), 5);
    assert_eq!(g.weights().len(), 5);
    assert!(g.quality().unwrap().residual.is_finite());
}

#[test]
fn test_linear_fit_matches_exact_least_squares() {
    use approx::assert_abs_diff_eq;
    use cmap_gradient::FitAlgorithm;
    use cmap_optim::linalg::{Matrix, lstsq};

    let base = presets::warm_dusk().unwrap();
    let config = GradientConfig {
        algorithm: FitAlgorithm::LeastSquares,
        ..*base.config()
    };
    let g = ColorGradient::new("lsq", base.anchors().to_vec(), config).unwrap();

    let t = cmap_math::linspace(0.0, 1.0, config.sample_count);
    let design = Matrix::from_fn(t.len(), config.degree, |r, c| t[r].powi(c as i32));
    for channel in 0..3 {
        let y: Vec<f64> = t.iter().map(|&ti| g.evaluate(ti)[channel]).collect();
        let exact = lstsq(&design, &y).unwrap();
        for (k, c) in g.coefficients().iter().enumerate() {
            assert_abs_diff_eq!(c[channel], exact[k], epsilon = 1e-6);
        }
    }
}
