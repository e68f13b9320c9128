use glam::DVec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use spot_plan::prelude::*;

fn unit(rng: &mut StdRng) -> f64 {
    (rng.next_u32() as f64) / (u32::MAX as f64)
}

#[test]
fn square_field_through_two_control_points() {
    let spec: FieldSpec =
        RectanglePattern::new(DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0), 1.0).into();
    let field = plan_field(&spec, 150.0, &DeliveryParams::default()).unwrap();

    let spots = &field.layers[0].spots;
    assert_eq!(spots.len(), 9);
    assert_eq!(spots.coordinates().len(), 18);
    assert!(spots.weights().iter().all(|w| *w == 1.0));

    let cps = field.control_points();
    assert_eq!(cps[0].cumulative_weight, 0.0);
    assert_eq!(cps[1].cumulative_weight, 9.0);
    assert!(cps[1].spot_weights.iter().all(|w| *w == 0.0));
    assert_eq!(field.final_cumulative_weight(), 9.0);
}

#[test]
fn disc_field_is_a_plus_shape() {
    let spec: FieldSpec = DiscPattern::new(DVec2::ZERO, 2.0, 1.0).into();
    let field = plan_field(&spec, 120.0, &DeliveryParams::default()).unwrap();
    let mut pts: Vec<(i64, i64)> = field.layers[0]
        .spots
        .positions()
        .map(|p| (p.x.round() as i64, p.y.round() as i64))
        .collect();
    pts.sort();
    assert_eq!(pts, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
}

#[test]
fn four_spot_builder_scenario() {
    let builder = ControlPointBuilder::try_new(DeliveryParams::default()).unwrap();
    let seq = builder
        .build_from_parts(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0], vec![1.0; 4], 100.0)
        .unwrap();
    assert_eq!(seq.control_points[0].cumulative_weight, 0.0);
    assert_eq!(seq.control_points[0].spot_weights, vec![1.0; 4]);
    assert_eq!(seq.control_points[1].cumulative_weight, 4.0);
    assert_eq!(seq.control_points[1].spot_weights, vec![0.0; 4]);
    assert_eq!(seq.total_monitor_units, 4.0);
}

#[test]
fn generators_keep_pair_invariant_for_random_bounds() {
    let mut rng = StdRng::seed_from_u64(0xF1E1D);
    for _ in 0..50 {
        let lo = DVec2::new(unit(&mut rng) * 10.0 - 5.0, unit(&mut rng) * 10.0 - 5.0);
        let size = DVec2::new(0.5 + unit(&mut rng) * 5.0, 0.5 + unit(&mut rng) * 5.0);
        let spacing = 0.1 + unit(&mut rng);

        let square = RectanglePattern::new(lo, lo + size, spacing);
        let hex = square.clone().with_lattice(LatticeMode::Hexagonal);
        let disc = DiscPattern::new(lo, size.x, spacing);

        let square = square.generate().unwrap();
        let hex = hex.generate().unwrap();
        let disc_spots = disc.generate().unwrap();

        assert_eq!(hex.len(), 2 * square.len());
        for set in [&square, &hex, &disc_spots] {
            assert_eq!(set.coordinates().len(), 2 * set.weights().len());
        }
        for p in disc_spots.positions() {
            assert!((p - lo).length() <= disc.radius() + 1e-9);
        }
    }
}

#[test]
fn image_field_from_config() {
    let path = std::env::temp_dir().join(format!("spot_plan_pipeline_{}.png", std::process::id()));
    // Left half dark grey, right half white.
    let img = image::GrayImage::from_fn(8, 8, |x, _| image::Luma([if x < 4 { 64 } else { 255 }]));
    img.save(&path).unwrap();

    let cfg = FieldConfig {
        xy_min: Some([0.0, 0.0]),
        xy_max: Some([8.0, 8.0]),
        spacing: Some(1.0),
        image_path: Some(path.clone()),
        resample: Some("nearest".into()),
        ..FieldConfig::new("image")
    };
    let spec = FieldSpec::try_from(cfg).unwrap();
    let field = plan_field(&spec, 130.0, &DeliveryParams::default().with_mu_per_spot(0.5));
    let _ = std::fs::remove_file(&path);
    let field = field.unwrap();

    let spots = &field.layers[0].spots;
    assert_eq!(spots.len(), 32);
    assert!(spots.positions().all(|p| p.x < 4.0));
    let expected = 1.0 - 64.0 / 255.0;
    assert!(spots.weights().iter().all(|w| (w - expected).abs() < 1e-12));
    assert_eq!(field.total_monitor_units(), 16.0);
    assert!((field.final_cumulative_weight() - 32.0 * expected).abs() < 1e-9);
}

#[test]
fn runner_plan_is_encoded_in_order() {
    let requests = vec![
        FieldRequest::new(
            "first",
            RectanglePattern::new(DVec2::ZERO, DVec2::new(2.0, 0.4), 1.0),
            150.0,
        )
        .with_energy_layers(vec![150.0, 140.0]),
        FieldRequest::new("second", DiscPattern::new(DVec2::ZERO, 2.0, 1.0), 130.0)
            .with_energy_layers(vec![130.0, 125.0]),
    ];
    let params = DeliveryParams::new(3).with_layer_scale(40.0);
    let mut sink = VecSink::new();
    let plan = PlanRunner::try_new(params)
        .unwrap()
        .run_with_events(&requests, &mut sink)
        .unwrap();

    // Three control points: delivery, transit, delivery.
    let first = &plan.fields[0];
    let cumulative: Vec<f64> = first
        .control_points()
        .iter()
        .map(|cp| cp.cumulative_weight)
        .collect();
    assert_eq!(cumulative, vec![0.0, 120.0, 120.0]);
    assert_eq!(first.final_cumulative_weight(), 240.0);
    assert_eq!(first.total_monitor_units(), 6.0);

    let mut seen = Vec::new();
    let mut encoder = |field: &Field| -> Result<()> {
        seen.push((field.id.clone(), field.control_points().len()));
        Ok(())
    };
    plan.encode_with(&mut encoder).unwrap();
    assert_eq!(
        seen,
        vec![("first".to_string(), 3), ("second".to_string(), 3)]
    );

    let finished = sink
        .as_slice()
        .iter()
        .filter(|e| e.kind() == BuildEventKind::FieldFinished)
        .count();
    assert_eq!(finished, 2);
}

#[test]
fn unknown_shape_is_rejected_before_generation() {
    let err = FieldSpec::try_from(FieldConfig::new("ellipse")).unwrap_err();
    assert!(matches!(err, Error::UnknownShape { ref tag } if tag == "ellipse"));
}

#[test]
fn coordinates_convert_to_millimeters_at_the_encoder() {
    let spec: FieldSpec = RectanglePattern::new(DVec2::ZERO, DVec2::new(1.0, 0.2), 0.5).into();
    let field = plan_field(&spec, 100.0, &DeliveryParams::default()).unwrap();
    let mm = to_millimeters(&field.control_points()[0].position_map);
    assert_eq!(mm, vec![0.0, 0.0, 5.0, 0.0, 10.0, 0.0]);
}
