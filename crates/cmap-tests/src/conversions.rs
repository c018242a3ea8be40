//! Conversion graph properties over all sixteen spaces.

use crate::{channel_diff, random_srgb, rng};
use cmap_math::Vec3;
use cmap_space::{ColorSpaceGraph, ColorSpaceType, Illuminant, Observer, convert};

const SAMPLES: usize = 100;
const TOLERANCE: f64 = 1e-4;

fn to(c: Vec3, from: ColorSpaceType, to: ColorSpaceType) -> Vec3 {
    convert(c, from, to, Observer::Cie1931, Illuminant::D65)
        .unwrap_or_else(|e| panic!("{from} -> {to}: {e}"))
}

/// Random colors expressed in `space`, generated from in-gamut sRGB.
fn samples_in(space: ColorSpaceType, seed: u64) -> Vec<Vec3> {
    let mut rng = rng(seed);
    (0..SAMPLES)
        .map(|_| to(random_srgb(&mut rng), ColorSpaceType::Srgb, space))
        .collect()
}

#[test]
fn test_round_trip_every_pair() {
    for a in ColorSpaceType::ALL {
        let colors = samples_in(a, 0xC0FFEE + a.index() as u64);
        for b in ColorSpaceType::ALL {
            for &c in &colors {
                let back = to(to(c, a, b), b, a);
                let diff = channel_diff(a, c, back);
                assert!(
                    diff < TOLERANCE,
                    "{a} -> {b} -> {a}: {c:?} came back as {back:?} (diff {diff:e})"
                );
            }
        }
    }
}

#[test]
fn test_identity_is_exact() {
    let mut rng = rng(1);
    for space in ColorSpaceType::ALL {
        for _ in 0..10 {
            let c = random_srgb(&mut rng) * 3.0 - Vec3::ONE;
            assert_eq!(to(c, space, space), c, "{space}");
        }
    }
}

#[test]
fn test_every_pair_reachable() {
    let graph = ColorSpaceGraph::global();
    for a in ColorSpaceType::ALL {
        for b in ColorSpaceType::ALL {
            let route = graph.route(a, b).unwrap();
            assert_eq!(route.from(), a);
            assert_eq!(route.to(), b);
            assert_eq!(route.is_empty(), a == b);
        }
    }
}

#[test]
fn test_multi_hop_route() {
    let route = ColorSpaceGraph::global()
        .route(ColorSpaceType::Hsl, ColorSpaceType::AcesAp1)
        .unwrap();
    assert_eq!(
        route.spaces(),
        vec![
            ColorSpaceType::Hsl,
            ColorSpaceType::Srgb,
            ColorSpaceType::Rgb,
            ColorSpaceType::CieXyz,
            ColorSpaceType::AcesAp1,
        ]
    );
}

#[test]
fn test_white_point_dependent_spaces() {
    // Reference white maps to L = 100, a = b = 0 under every illuminant
    for observer in Observer::ALL {
        for illuminant in Illuminant::ALL {
            let white = cmap_space::white_point(observer, illuminant);
            let lab = convert(white, ColorSpaceType::CieXyz, ColorSpaceType::CieLab, observer, illuminant).unwrap();
            assert!(
                lab.max_abs_diff(Vec3::new(100.0, 0.0, 0.0)) < 1e-9,
                "{observer}/{illuminant}: {lab:?}"
            );
        }
    }
}

#[test]
fn test_known_values() {
    // sRGB white is D65 with Y = 100
    let xyz = to(Vec3::ONE, ColorSpaceType::Srgb, ColorSpaceType::CieXyz);
    assert!(xyz.max_abs_diff(Vec3::new(95.047, 100.0, 108.883)) < 0.01, "{xyz:?}");

    // Pure red in OKLab
    let ok = to(Vec3::new(1.0, 0.0, 0.0), ColorSpaceType::Srgb, ColorSpaceType::OkLab);
    assert!(ok.max_abs_diff(Vec3::new(0.6279, 0.2249, 0.1258)) < 1e-3, "{ok:?}");

    // Luma of pure green
    let ycc = to(Vec3::new(0.0, 1.0, 0.0), ColorSpaceType::Srgb, ColorSpaceType::YCbCr);
    assert!((ycc.x - 0.587).abs() < 1e-12);
}
