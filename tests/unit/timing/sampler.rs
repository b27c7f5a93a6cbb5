use super::*;

fn entry(path_index: usize, start_frame: u64, end_frame: u64) -> ScheduleEntry {
    ScheduleEntry {
        path_index,
        start_frame,
        end_frame,
    }
}

fn schedule(entries: Vec<ScheduleEntry>, budget_frames: u64) -> Schedule {
    Schedule {
        draw_order: (0..entries.len()).collect(),
        entries,
        budget_frames,
        planned_seconds: 0.0,
        compression: 1.0,
    }
}

#[test]
fn edge_ramp_is_continuous_and_monotone() {
    let e = 0.05;
    assert_eq!(edge_ramp(0.0, e), 0.0);
    assert!((edge_ramp(1.0, e) - 1.0).abs() < 1e-12);
    assert!((edge_ramp(0.5, e) - 0.5).abs() < 1e-12);

    let eps = 1e-9;
    for knot in [e, 1.0 - e] {
        assert!((edge_ramp(knot - eps, e) - edge_ramp(knot + eps, e)).abs() < 1e-6);
    }

    let mut prev = 0.0;
    for i in 0..=1000 {
        let v = edge_ramp(f64::from(i) / 1000.0, e);
        assert!(v >= prev, "ramp decreased at step {i}");
        prev = v;
    }
    assert_eq!(edge_ramp(0.3, 0.0), 0.3);
}

#[test]
fn progress_is_zero_before_and_one_after_window() {
    let s = schedule(vec![entry(0, 10, 30)], 40);
    let sampler = ProgressSampler::new(&s, Strategy::Sequential, &SamplerConfig::default());
    let e = &s.entries[0];
    assert_eq!(sampler.progress(e, 0), 0.0);
    assert_eq!(sampler.progress(e, 9), 0.0);
    assert!((sampler.progress(e, 20) - 0.5).abs() < 1e-12);
    assert_eq!(sampler.progress(e, 30), 1.0);
    assert_eq!(sampler.progress(e, 10_000), 1.0);
}

#[test]
fn catch_up_accelerates_when_work_exceeds_window() {
    let s = schedule(vec![entry(0, 0, 10), entry(1, 0, 10)], 10);
    let sampler = ProgressSampler::new(&s, Strategy::Sequential, &SamplerConfig::default());
    assert!((sampler.acceleration_at(0) - 2.0).abs() < 1e-12);
    assert_eq!(sampler.progress(&s.entries[0], 5), 1.0);
    assert!(sampler.max_acceleration() >= 2.0);
}

#[test]
fn catch_up_is_off_for_parallel_and_when_disabled() {
    let s = schedule(vec![entry(0, 0, 10), entry(1, 0, 10)], 10);
    let parallel = ProgressSampler::new(&s, Strategy::Parallel, &SamplerConfig::default());
    assert_eq!(parallel.acceleration_at(3), 1.0);

    let cfg = SamplerConfig {
        catch_up: false,
        ..SamplerConfig::default()
    };
    let off = ProgressSampler::new(&s, Strategy::Balanced, &cfg);
    assert_eq!(off.acceleration_at(3), 1.0);
    assert_eq!(off.max_acceleration(), 1.0);
}

#[test]
fn on_plan_schedules_do_not_accelerate() {
    let s = schedule(vec![entry(0, 0, 10), entry(1, 10, 20)], 30);
    let sampler = ProgressSampler::new(&s, Strategy::Sequential, &SamplerConfig::default());
    for f in 0..40 {
        assert_eq!(sampler.acceleration_at(f), 1.0);
    }
}

#[test]
fn progress_never_decreases_under_catch_up() {
    let s = schedule(
        vec![entry(0, 0, 12), entry(1, 3, 15), entry(2, 5, 20), entry(3, 14, 20)],
        20,
    );
    let sampler = ProgressSampler::new(&s, Strategy::Balanced, &SamplerConfig::default());
    let mut prev_accel = 0.0;
    for f in 0..25 {
        let a = sampler.acceleration_at(f);
        assert!(a >= prev_accel);
        prev_accel = a;
    }
    for e in &s.entries {
        let mut prev = 0.0;
        for f in 0..25 {
            let p = sampler.progress(e, f);
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= prev, "entry {e:?} regressed at frame {f}");
            prev = p;
        }
    }
}

#[test]
fn validate_bounds_edge_fraction() {
    assert!(SamplerConfig::default().validate().is_ok());
    let cfg = SamplerConfig {
        edge_fraction: 0.75,
        ..SamplerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn progress_is_bounded_by_the_half_open_window() {
    let sampler = ProgressSampler::new(
        &schedule(vec![entry(0, 2, 6), entry(1, 4, 4)], 10),
        Strategy::Sequential,
        &SamplerConfig::default(),
    );
    let drawn = entry(0, 2, 6);
    assert_eq!(sampler.progress(&drawn, 1), 0.0);
    assert_eq!(sampler.progress(&drawn, 2), 0.0);
    assert!(sampler.progress(&drawn, 5) < 1.0);
    assert_eq!(sampler.progress(&drawn, 6), 1.0);

    // A zero-length window is complete from its first frame and adds no catch-up work.
    assert_eq!(sampler.progress(&entry(1, 4, 4), 4), 1.0);
    assert_eq!(sampler.max_acceleration(), 1.0);
}
