use super::*;
use crate::foundation::core::Point;
use crate::path::segment::Segment;

fn path(x: f64, top: f64, bottom: f64, length: f64) -> ParsedPath {
    let start = Point::new(x, top);
    let mut p = ParsedPath::from_segments(
        format!("{x}:{top}"),
        start,
        vec![Segment::line(start, Point::new(x + 1.0, bottom))],
    );
    p.segments[0].length = length;
    p.recompute_total();
    p
}

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn strategy_parses_and_displays() {
    assert_eq!("Balanced".parse::<Strategy>().unwrap(), Strategy::Balanced);
    assert_eq!(" parallel ".parse::<Strategy>().unwrap(), Strategy::Parallel);
    assert!("zigzag".parse::<Strategy>().is_err());
    assert_eq!(Strategy::default().to_string(), "sequential");
    let s: Strategy = serde_json::from_str("\"balanced\"").unwrap();
    assert_eq!(s, Strategy::Balanced);
}

#[test]
fn separate_rows_run_back_to_back_without_compression() {
    let paths = [path(0.0, 0.0, 10.0, 100.0), path(0.0, 50.0, 60.0, 300.0)];
    let s = build_schedule(&paths, Strategy::Sequential, fps30(), 90, &ScheduleConfig::default());
    assert_eq!(s.compression, 1.0);
    assert!((s.planned_seconds - 1.0).abs() < 1e-12);
    assert_eq!(
        s.entries,
        vec![
            ScheduleEntry {
                path_index: 0,
                start_frame: 0,
                end_frame: 8
            },
            ScheduleEntry {
                path_index: 1,
                start_frame: 8,
                end_frame: 30
            },
        ]
    );
}

#[test]
fn same_row_paths_overlap_slightly() {
    let paths = [path(0.0, 0.0, 10.0, 100.0), path(100.0, 0.0, 10.0, 100.0)];
    let s = build_schedule(&paths, Strategy::Sequential, fps30(), 90, &ScheduleConfig::default());
    assert_eq!(s.entries[0].end_frame, 8);
    assert_eq!(s.entries[1].start_frame, 7);
    assert_eq!(s.entries[1].end_frame, 14);
}

#[test]
fn overrun_is_compressed_to_end_exactly_on_budget() {
    let paths: Vec<_> = (0..200)
        .map(|i| path(0.0, f64::from(i) * 10.0, f64::from(i) * 10.0 + 5.0, 1000.0))
        .collect();
    let s = build_schedule(&paths, Strategy::Sequential, fps30(), 90, &ScheduleConfig::default());
    assert!(s.compression < 1.0);
    assert!((s.planned_seconds - 500.0).abs() < 1e-6);
    assert_eq!(s.last_end_frame(), 90);
    for e in &s.entries {
        assert!(e.start_frame < e.end_frame && e.end_frame <= 90, "{e:?}");
    }
}

#[test]
fn parallel_starts_everything_at_zero() {
    let paths = [path(0.0, 0.0, 10.0, 100.0), path(0.0, 500.0, 510.0, 400.0)];
    let s = build_schedule(&paths, Strategy::Parallel, fps30(), 90, &ScheduleConfig::default());
    assert!(s.entries.iter().all(|e| e.start_frame == 0));
    assert_eq!(s.entries[1].end_frame, 30);
    assert_eq!(s.draw_order, vec![0, 1]);
}

#[test]
fn sequential_order_uses_row_tolerance_then_bottom_then_x() {
    let paths = [
        path(50.0, 10.0, 30.0, 100.0),
        path(0.0, 11.0, 30.0, 100.0),
        path(0.0, 10.5, 60.0, 100.0),
        path(0.0, 50.0, 70.0, 100.0),
    ];
    let order = draw_order(&paths, Strategy::Sequential, &ScheduleConfig::default());
    assert_eq!(order, vec![1, 0, 2, 3]);
}

#[test]
fn balanced_order_buckets_then_sorts_by_length() {
    let paths = [
        path(0.0, 5.0, 6.0, 300.0),
        path(10.0, 15.0, 16.0, 100.0),
        path(0.0, 25.0, 26.0, 50.0),
    ];
    let order = draw_order(&paths, Strategy::Balanced, &ScheduleConfig::default());
    assert_eq!(order, vec![1, 0, 2]);
}

#[test]
fn zero_budget_clamps_entries_to_one_frame() {
    let paths = [path(0.0, 0.0, 10.0, 100.0), path(0.0, 50.0, 60.0, 100.0)];
    let s = build_schedule(&paths, Strategy::Sequential, fps30(), 0, &ScheduleConfig::default());
    for e in &s.entries {
        assert_eq!((e.start_frame, e.end_frame), (0, 1));
    }
}

#[test]
fn zero_length_paths_get_one_frame() {
    let paths = [path(0.0, 0.0, 10.0, 0.0)];
    let s = build_schedule(&paths, Strategy::Sequential, fps30(), 90, &ScheduleConfig::default());
    assert_eq!(s.entries[0].duration_frames(), 1);
    assert_eq!(s.entries[0].range().len_frames(), 1);
}

#[test]
fn no_paths_yield_empty_schedule() {
    let s = build_schedule(&[], Strategy::Balanced, fps30(), 90, &ScheduleConfig::default());
    assert!(s.is_empty());
    assert_eq!(s.last_end_frame(), 0);
}
