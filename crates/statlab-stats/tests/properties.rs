use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use statlab_stats::{
    bootstrap::calculate_bootstrap_confidence_interval,
    descriptive::BasicStats,
    hypothesis::{Alternative, perform_two_sample_t_test},
    interval::{
        calculate_confidence_interval, calculate_paired_mean_ci, calculate_two_proportion_ci,
        calculate_two_sample_mean_ci, calculate_variance_ci, calculate_wilson_confidence_interval,
    },
    power::{calculate_power_two_sample_t, calculate_sample_size_two_sample_t},
    power_curve::{PowerAxis, PowerCurveParams, PowerTestType, generate_power_function_data},
    rohe::perform_rohe_analysis,
    sampling::{Tail, calculate_mean_boundary, calculate_mean_probability_from_data},
};

fn random_sample(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random_range(-50.0..150.0)).collect()
}

#[test]
#[expect(clippy::cast_precision_loss)]
fn basic_stats_match_definitions() {
    let mut rng = StdRng::seed_from_u64(2024);
    for n in [2, 3, 10, 11, 57] {
        let data = random_sample(&mut rng, n);
        let stats = BasicStats::new(&data).unwrap();

        let mean = data.iter().sum::<f64>() / data.len() as f64;
        assert!((stats.mean - mean).abs() < 1e-9);

        let mut sorted = data.clone();
        sorted.sort_by(f64::total_cmp);
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        assert!((stats.median - median).abs() < 1e-12);

        assert!(stats.variance >= 0.0);
        assert_eq!(stats.std_dev, stats.variance.sqrt());
    }
}

#[test]
fn every_interval_is_ordered() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in [3, 12, 45] {
        let a = random_sample(&mut rng, n);
        let b = random_sample(&mut rng, n);
        for level in [0.8, 0.9, 0.95, 0.99] {
            let intervals = [
                calculate_confidence_interval(&a, level, None).unwrap().interval,
                calculate_confidence_interval(&a, level, Some(400.0)).unwrap().interval,
                calculate_two_sample_mean_ci(&a, &b, level, true).unwrap().interval,
                calculate_two_sample_mean_ci(&a, &b, level, false).unwrap().interval,
                calculate_paired_mean_ci(&a, &b, level).unwrap().interval,
                calculate_variance_ci(&a, level).unwrap().interval,
                calculate_wilson_confidence_interval(3, 20, level).unwrap().interval,
                calculate_two_proportion_ci(12, 40, 25, 50, level).unwrap().interval,
                calculate_bootstrap_confidence_interval(&a, level, 200, &mut rng)
                    .unwrap()
                    .interval,
            ];
            for interval in intervals {
                assert!(interval.lower <= interval.upper, "{interval:?}");
            }
        }
    }
}

#[test]
fn demonstration_cases_are_reproduced() {
    let wilson = calculate_wilson_confidence_interval(40, 100, 0.95).unwrap();
    assert!((wilson.proportion - 0.4).abs() < f64::EPSILON);
    assert!((wilson.interval.lower - 0.309).abs() < 0.001);
    assert!((wilson.interval.upper - 0.497).abs() < 0.001);

    let mean = calculate_confidence_interval(&[1478.0; 27], 0.95, Some(1296.0)).unwrap();
    assert!((mean.interval.lower - 1464.42).abs() < 0.01);
    assert!((mean.interval.upper - 1491.58).abs() < 0.01);
}

#[test]
fn rohe_minimum_size_and_clean_sample() {
    let err = perform_rohe_analysis(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 0.05)
        .unwrap_err();
    assert!(!err.to_string().is_empty());

    let clean = [20.1, 19.8, 20.4, 20.0, 19.7, 20.3, 20.2, 19.9, 20.5, 19.6];
    let report = perform_rohe_analysis(&clean, 0.05).unwrap();
    assert_eq!(report.outliers.count, 0);
}

#[test]
fn power_curves_stay_in_unit_interval() {
    for test_type in [
        PowerTestType::OneSampleT,
        PowerTestType::TwoSampleT,
        PowerTestType::Proportion,
    ] {
        for alternative in [Alternative::Less, Alternative::Greater, Alternative::TwoSided] {
            let params = PowerCurveParams {
                alternative,
                p0: 0.3,
                effect_size: 0.1,
                ..PowerCurveParams::default()
            };
            for (axis, range) in [
                (PowerAxis::EffectSize, (0.0, 1.0)),
                (PowerAxis::SampleSize, (1.0, 300.0)),
            ] {
                let curve = generate_power_function_data(test_type, axis, &params, range);
                assert!(curve.iter().all(|point| (0.0..=1.0).contains(&point.y)));
            }
        }
    }
}

#[test]
fn proportion_sweep_saturates_when_p1_reaches_one() {
    let params = PowerCurveParams {
        alternative: Alternative::Greater,
        p0: 0.6,
        sample_size: 15,
        ..PowerCurveParams::default()
    };
    let curve = generate_power_function_data(
        PowerTestType::Proportion,
        PowerAxis::EffectSize,
        &params,
        (0.0, 0.6),
    );
    let saturated = curve.iter().filter(|point| point.x > 0.41).collect::<Vec<_>>();
    assert!(!saturated.is_empty());
    assert!(saturated.iter().all(|point| (point.y - 1.0).abs() < f64::EPSILON));
}

#[test]
fn pooled_and_welch_agree_on_equal_spread() {
    let a = [3.0, 5.0, 4.0, 6.0, 2.0, 4.0, 5.0, 3.0];
    let b = [6.0, 8.0, 7.0, 9.0, 5.0, 7.0, 8.0, 6.0];
    let pooled = perform_two_sample_t_test(&a, &b, 0.05, Alternative::TwoSided, true).unwrap();
    let welch = perform_two_sample_t_test(&a, &b, 0.05, Alternative::TwoSided, false).unwrap();
    assert!((pooled.statistic - welch.statistic).abs() < 1e-9);
    assert!((pooled.p_value - welch.p_value).abs() < 1e-9);
}

#[test]
fn planned_sample_size_delivers_target_power() {
    for effect_size in [0.4, 0.6, 1.0] {
        let plan =
            calculate_sample_size_two_sample_t(effect_size, 0.05, 0.8, Alternative::TwoSided)
                .unwrap();
        let n = usize::try_from(plan.sample_size_per_group.unwrap()).unwrap();
        let power = calculate_power_two_sample_t(effect_size, n, 0.05, Alternative::TwoSided)
            .unwrap()
            .power;
        assert!(power > 0.75, "d = {effect_size}: power {power}");
    }
}

#[test]
fn mean_boundary_round_trips_through_probability() {
    let mut rng = StdRng::seed_from_u64(5);
    for n in [8, 40] {
        let data = random_sample(&mut rng, n);
        for p in [0.05, 0.3, 0.5, 0.9] {
            let boundary = calculate_mean_boundary(&data, p, Tail::Upper).unwrap();
            let back =
                calculate_mean_probability_from_data(&data, boundary.boundary, Tail::Upper)
                    .unwrap();
            assert!((back.probability - p).abs() < 0.01);
        }
    }
}
