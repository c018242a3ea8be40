//! Document persistence: files, formats and reproducible refits.

use cmap_gradient::{
    ColorGradient, DocumentFormat, FitAlgorithm, GradientConfig, GradientDocument, GradientRecord, ModelKind,
    WeightSpace, presets,
};
use cmap_math::Vec3;
use cmap_space::{ColorSpaceType, Illuminant, Observer};
use tempfile::tempdir;

fn assert_same_derived(a: &ColorGradient, b: &ColorGradient) {
    assert_eq!(a.name(), b.name());
    assert_eq!(a.anchors(), b.anchors());
    assert_eq!(a.config(), b.config());
    assert_eq!(a.weights(), b.weights(), "{}", a.name());
    assert_eq!(a.coefficients(), b.coefficients(), "{}", a.name());
}

#[test]
fn test_presets_round_trip_through_files() {
    let dir = tempdir().unwrap();
    let gradients = presets::all().unwrap();
    let doc = GradientDocument::from_gradients(&gradients);

    for name in ["presets.yaml", "presets.yml", "presets.json"] {
        let path = dir.path().join(name);
        doc.save(&path).unwrap();
        let loaded = GradientDocument::load(&path).unwrap();
        assert_eq!(loaded, doc, "{name}");

        let refit = loaded.to_gradients().unwrap();
        assert_eq!(refit.len(), gradients.len());
        for (a, b) in gradients.iter().zip(&refit) {
            assert_same_derived(a, b);
        }
    }
}

#[test]
fn test_non_default_config_survives() {
    let config = GradientConfig {
        degree: 5,
        weight_space: WeightSpace::Space(ColorSpaceType::HunterLch),
        mix_space: ColorSpaceType::CieLuv,
        model: ModelKind::Fourier,
        wraparound: false,
        observer: Observer::Cie1964,
        illuminant: Illuminant::F7,
        algorithm: FitAlgorithm::LeastSquares,
        max_iterations: 300,
        sample_count: 128,
    };
    let g = ColorGradient::new(
        "custom",
        vec![Vec3::new(0.2, 0.1, 0.4), Vec3::new(0.9, 0.8, 0.2), Vec3::new(0.1, 0.6, 0.5)],
        config,
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.json");
    GradientDocument::from_gradients([&g]).save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let record = &json["gradients"][0];
    assert_eq!(record["weight_color_space"], "HunterLCH");
    assert_eq!(record["mix_color_space"], "CIELuv");
    assert_eq!(record["illuminant"], "F7");
    assert_eq!(record["model"], "Fourier");
    assert_eq!(record["wraparound"], false);
    assert_eq!(record["max_fit_iteration_count"], 300);
    assert_eq!(record["fit_amount"], 128);

    let loaded = GradientDocument::load(&path).unwrap().to_gradients().unwrap();
    assert_same_derived(&g, &loaded[0]);
}

#[test]
fn test_hand_written_yaml() {
    let text = r#"
gradients:
  - name: Two Tone
    degree: 4
    weight_color_space: Unweighted
    colors:
      - [0.0, 0.0, 0.5]
      - [1.0, 0.8, 0.0]
    model: ChebyshevU
    wraparound: false
"#;
    let doc = GradientDocument::parse(text, DocumentFormat::Yaml).unwrap();
    assert_eq!(doc.preview_color_spaces, GradientDocument::default_previews());

    let record: &GradientRecord = &doc.gradients[0];
    assert_eq!(record.mix_color_space, ColorSpaceType::OkLab);
    assert_eq!(record.fit_amount, 256);

    let g = &doc.to_gradients().unwrap()[0];
    assert_eq!(g.weights(), &[0.0, 1.0]);
    assert_eq!(g.coefficients().len(), 4);
    assert!(g.evaluate(1.0).max_abs_diff(Vec3::new(1.0, 0.8, 0.0)) < 1e-9);
}

#[test]
fn test_preview_color_maps() {
    let g = presets::warm_dusk().unwrap();
    let doc = GradientDocument::default();
    let maps = g.color_maps(&doc.preview_pairs()).unwrap();
    assert_eq!(maps.len(), doc.preview_color_spaces.len());
    for curve in &maps {
        assert_eq!(curve.model(), ModelKind::HornerPolynomial);
        assert!(curve.quality().unwrap().residual.is_finite());
    }
}

#[test]
fn test_bad_record_is_rejected() {
    let text = r#"{"gradients": [{"name": "empty", "colors": []}]}"#;
    let doc = GradientDocument::parse(text, DocumentFormat::Json).unwrap();
    assert!(doc.to_gradients().is_err());
}
