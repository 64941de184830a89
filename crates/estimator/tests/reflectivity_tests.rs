//! Tests for the reverse color lookup.

use estimator::resolve_dbz;
use radar_common::{CalibrationEntry, RadarError};

fn entry(dbz: i32, rgb: [u8; 3]) -> CalibrationEntry {
    CalibrationEntry { dbz, rgb }
}

#[test]
fn test_exact_color_returns_its_entry() {
    let table = vec![
        entry(5, [0, 191, 255]),
        entry(30, [255, 255, 0]),
        entry(45, [255, 0, 0]),
    ];

    assert_eq!(resolve_dbz([255, 255, 0], &table).unwrap().dbz, 30);
    assert_eq!(resolve_dbz([0, 191, 255], &table).unwrap().dbz, 5);
    assert_eq!(resolve_dbz([255, 0, 0], &table).unwrap().dbz, 45);
}

#[test]
fn test_nearest_color_wins() {
    let table = vec![entry(10, [0, 100, 0]), entry(40, [200, 0, 0])];

    // Slightly off the green entry
    assert_eq!(resolve_dbz([10, 90, 5], &table).unwrap().dbz, 10);
    // Clearly red
    assert_eq!(resolve_dbz([180, 20, 10], &table).unwrap().dbz, 40);
}

#[test]
fn test_equidistant_color_returns_first_entry() {
    // (100, 0, 0) and (140, 0, 0) are both 20 away from (120, 0, 0)
    let table = vec![entry(10, [100, 0, 0]), entry(20, [140, 0, 0])];
    assert_eq!(resolve_dbz([120, 0, 0], &table).unwrap().dbz, 10);

    // Same table reversed: the other entry now wins
    let table = vec![entry(20, [140, 0, 0]), entry(10, [100, 0, 0])];
    assert_eq!(resolve_dbz([120, 0, 0], &table).unwrap().dbz, 20);
}

#[test]
fn test_empty_table_rejected() {
    assert!(matches!(
        resolve_dbz([0, 0, 0], &[]),
        Err(RadarError::EmptyCalibrationTable)
    ));
}

#[test]
fn test_lookup_is_deterministic() {
    let table = vec![
        entry(0, [0, 255, 255]),
        entry(15, [0, 255, 0]),
        entry(30, [255, 255, 0]),
        entry(45, [255, 0, 0]),
        entry(60, [255, 0, 255]),
    ];

    let sample = [120, 130, 90];
    let first = resolve_dbz(sample, &table).unwrap().dbz;
    for _ in 0..10 {
        assert_eq!(resolve_dbz(sample, &table).unwrap().dbz, first);
    }
}
