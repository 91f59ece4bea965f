//! Integration tests for generating and inserting anomalies.
//!
//! These tests drive the public API end to end with synthetic series.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use tsag::prelude::*;

/// Create a noisy sine wave to act as a host series.
fn create_synthetic_series(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|t| (t as f64 * 0.2).sin() + rng.gen::<f64>() * 0.1)
        .collect()
}

fn square_template() -> Template {
    Template::new(vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0]).expect("non-empty template")
}

#[test]
fn test_insert_preserves_host_outside_window() {
    let host = create_synthetic_series(100, 1);
    let anomaly = RangeShiftAnomaly::new(square_template(), RangeShiftConfig::new(0.5))
        .expect("valid ratio");

    let before = host.clone();
    let out = anomaly.insert(&host, Some(40)).expect("window fits");

    assert_eq!(host, before, "host must not be mutated");
    assert_eq!(out.len(), host.len());
    assert_eq!(&out[..40], &host[..40]);
    assert_eq!(&out[40..48], anomaly.generate());
    assert_eq!(&out[48..], &host[48..]);
}

#[test]
fn test_insert_rejects_window_past_end() {
    let host = create_synthetic_series(10, 2);
    let anomaly = AmplitudeShiftAnomaly::new(square_template(), AmplitudeShiftConfig::default())
        .expect("valid ratio");

    assert!(anomaly.insert(&host, Some(2)).is_ok());
    let err = anomaly.insert(&host, Some(3)).unwrap_err();
    assert_eq!(
        err,
        AnomalyError::IndexOutOfRange {
            index: 3,
            segment_len: 8,
            host_len: 10
        }
    );
}

#[test]
fn test_random_insert_is_deterministic_for_a_seed() {
    let host = create_synthetic_series(200, 3);
    let anomaly = PointAnomaly::new(square_template(), PointConfig::new(4.0)).expect("valid");

    let starts = |seed: u64| {
        let mut rng = Seed::new(seed).to_rng();
        (0..25)
            .map(|_| {
                anomaly
                    .insert_labeled(&host, None, &mut rng)
                    .expect("host is long enough")
                    .start
            })
            .collect::<Vec<_>>()
    };

    let first = starts(2024);
    assert_eq!(first, starts(2024));
    assert!(first.iter().all(|&s| s <= 192));
    assert_ne!(first, starts(2025));
}

#[test]
fn test_random_insert_into_short_host_fails() {
    let anomaly = RangeShiftAnomaly::new(square_template(), RangeShiftConfig::default()).expect("valid");
    let mut rng = Seed::new(0).to_rng();
    let err = anomaly.insert_with_rng(&[0.0; 7], None, &mut rng).unwrap_err();
    assert_eq!(
        err,
        AnomalyError::HostTooShort {
            host_len: 7,
            segment_len: 8
        }
    );
}

#[test]
fn test_labels_mark_exactly_the_anomaly() {
    let host = create_synthetic_series(50, 4);
    let anomaly = NoisyAnomaly::new(square_template(), NoisyConfig::new(0.0, 3.0).with_seed(Seed::new(5)))
        .expect("valid");
    let mut rng = Seed::new(11).to_rng();
    let labeled = anomaly.insert_labeled(&host, None, &mut rng).expect("fits");

    let labels = labeled.labels();
    assert_eq!(labels.len(), host.len());
    assert_eq!(labels.iter().filter(|&&l| l).count(), 8);
    for (i, &label) in labels.iter().enumerate() {
        assert_eq!(label, labeled.window().contains(&i));
        if !label {
            assert_eq!(labeled.series[i], host[i]);
        }
    }
}

#[test]
fn test_compound_equals_manual_chain_value_by_value() {
    let template = square_template();
    let compound = CompoundAnomaly::new(
        template.clone(),
        CompoundConfig::new()
            .then(FrequencyShiftConfig::new(1.0 / 3.0))
            .then(AmplitudeShiftConfig::new(1.0 / 3.0))
            .then(RangeShiftConfig::new(0.5)),
    )
    .expect("valid compound");

    let step1 = FrequencyShiftAnomaly::new(template, FrequencyShiftConfig::new(1.0 / 3.0))
        .expect("valid")
        .into_generated();
    let step2 = AmplitudeShiftAnomaly::from_values(&step1, AmplitudeShiftConfig::new(1.0 / 3.0))
        .expect("valid")
        .into_generated();
    let step3 = RangeShiftAnomaly::from_values(&step2, RangeShiftConfig::new(0.5))
        .expect("valid")
        .into_generated();

    assert_eq!(compound.generate().len(), step3.len());
    for (i, (a, b)) in compound.generate().iter().zip(&step3).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "index {i}");
    }
}

#[test]
fn test_recipe_from_json() {
    let recipe = r#"{
        "kind": "compound",
        "steps": [
            {"kind": "point", "index": 2, "magnitude": 5.0},
            {"kind": "range_shift", "ratio": -0.25}
        ]
    }"#;
    let spec: AnomalySpec = serde_json::from_str(recipe).expect("valid recipe");
    let anomaly = spec.build(square_template()).expect("valid for template");
    assert_eq!(anomaly.name(), "CompoundAnomaly");
    assert_eq!(anomaly.generate().len(), 8);

    let host = vec![0.0; 12];
    assert_eq!(anomaly.insert(&host, None).expect("fits").len(), 12);
}

#[test]
fn test_generators_share_one_template() {
    let template = square_template();
    let generators: Vec<Box<dyn AnomalyGenerator>> = vec![
        Box::new(PointAnomaly::new(template.clone(), PointConfig::default()).expect("valid")),
        Box::new(FrequencyShiftAnomaly::new(template.clone(), FrequencyShiftConfig::default()).expect("valid")),
        Box::new(AmplitudeShiftAnomaly::new(template.clone(), AmplitudeShiftConfig::default()).expect("valid")),
        Box::new(RangeShiftAnomaly::new(template.clone(), RangeShiftConfig::default()).expect("valid")),
    ];

    for generator in &generators {
        assert!(std::ptr::eq(
            generator.template().as_slice().as_ptr(),
            template.as_slice().as_ptr()
        ));
        assert_eq!(generator.generate().len(), template.len());
        generator.plot(&mut NoopPlotter);
    }
    assert_eq!(template.as_slice(), &[0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0]);
}
