use ndarray::Array2;
use segmeter::{
    error::MeterError,
    meter::{ConfusionMeter, ConfusionValue},
    util::test_util::setup_test_tracing,
};
use tracing::info;

fn batch() -> (Vec<usize>, Vec<usize>) {
    let predicted = vec![0, 1, 2, 2, 1, 0, 3, 3, 1, 2, 0, 0];
    let target = vec![0, 1, 2, 1, 1, 3, 3, 0, 2, 2, 0, 1];
    (predicted, target)
}

#[test]
fn test_fresh_meter_is_zero() {
    let _guards = setup_test_tracing("fresh_meter_is_zero");
    for k in 1..=5 {
        let raw = ConfusionMeter::new(k, false).unwrap();
        assert_eq!(raw.value(), ConfusionValue::Counts(Array2::zeros((k, k))));
        let normalized = ConfusionMeter::new(k, true).unwrap();
        assert_eq!(
            normalized.value(),
            ConfusionValue::Normalized(Array2::zeros((k, k)))
        );
    }
}

#[test]
fn test_permutation_invariance() {
    let _guards = setup_test_tracing("permutation_invariance");
    let (predicted, target) = batch();

    let mut ordered = ConfusionMeter::new(4, false).unwrap();
    ordered.add(&predicted, &target).unwrap();

    let mut pairs: Vec<(usize, usize)> = predicted.into_iter().zip(target).collect();
    pairs.reverse();
    pairs.rotate_left(5);
    let (shuffled_predicted, shuffled_target): (Vec<usize>, Vec<usize>) =
        pairs.into_iter().unzip();

    let mut shuffled = ConfusionMeter::new(4, false).unwrap();
    shuffled.add(&shuffled_predicted, &shuffled_target).unwrap();

    info!("Counts:\n{}", ordered.value());
    assert_eq!(ordered.counts(), shuffled.counts());
}

#[test]
fn test_reset_matches_fresh_meter() {
    let (predicted, target) = batch();
    let mut meter = ConfusionMeter::new(4, true).unwrap();
    meter.add(&predicted, &target).unwrap();
    meter.reset();
    assert_eq!(meter, ConfusionMeter::new(4, true).unwrap());
}

#[test]
fn test_accumulation_is_additive() {
    let (predicted, target) = batch();
    let (p1, p2) = predicted.split_at(5);
    let (t1, t2) = target.split_at(5);

    let mut split = ConfusionMeter::new(4, false).unwrap();
    split.add(p1, t1).unwrap();
    split.add(p2, t2).unwrap();

    let mut whole = ConfusionMeter::new(4, false).unwrap();
    whole.add(&[p1, p2].concat(), &[t1, t2].concat()).unwrap();

    assert_eq!(split.counts(), whole.counts());
    assert_eq!(split.total(), predicted.len() as u64);
}

#[test]
fn test_normalized_rows_sum_to_one_or_zero() {
    let mut meter = ConfusionMeter::new(5, true).unwrap();
    let (predicted, target) = batch();
    meter.add(&predicted, &target).unwrap();

    let probabilities = meter.value().to_f64();
    for (row, counts) in probabilities.rows().into_iter().zip(meter.counts().rows()) {
        assert!(row.iter().all(|v| v.is_finite()));
        let sum: f64 = row.sum();
        if counts.sum() == 0 {
            assert_eq!(sum, 0.0);
        } else {
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_out_of_range_target() {
    let mut meter = ConfusionMeter::new(3, false).unwrap();
    let result = meter.add(&[0, 1, 2], &[0, 5, 2]);
    match result {
        Err(MeterError::LabelRange { value, classes, .. }) => {
            assert_eq!(value, 5);
            assert_eq!(classes, 3);
        }
        other => panic!("expected LabelRange, got {:?}", other),
    }
    assert_eq!(meter.total(), 0);
}
