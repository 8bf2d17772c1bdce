#[allow(dead_code)]
mod common;

use common::{fit, frames};
use poto_core::frame::{assign_sequence, format_sequence_id, parse_file_name};

const LIGHT: &str = "Light_M31_60.0s_Bin1_H_gain100";
const OTHER: &str = "Light_M31_60.0s_Bin1_O_gain100";

#[test]
fn test_first_frame_opens_sequence() {
    let name = parse_file_name(&fit(LIGHT, "20240626-010850", "-10.0C", 1)).unwrap();
    let slot = assign_sequence(None, &name);

    assert_eq!(slot.sequence_id, "20240626-010850");
    assert_eq!(slot.sequence_position, 1);
    assert_eq!(format_sequence_id(&name.timestamp), "20240626-010850");
}

#[test]
fn test_increasing_indices_share_sequence_with_gaps() {
    let listing = frames(&[
        fit(LIGHT, "20240626-010850", "-10.0C", 1),
        fit(LIGHT, "20240626-010951", "-10.0C", 2),
        fit(LIGHT, "20240626-011255", "-10.1C", 5),
    ]);

    assert!(listing.iter().all(|f| f.sequence_id == "20240626-010850"));
    let positions: Vec<u32> = listing.iter().map(|f| f.sequence_position).collect();
    assert_eq!(positions, vec![1, 2, 5]);
}

#[test]
fn test_index_reset_opens_new_sequence() {
    let listing = frames(&[
        fit(LIGHT, "20240626-010850", "-10.0C", 1),
        fit(LIGHT, "20240626-010951", "-10.0C", 2),
        fit(LIGHT, "20240627-213000", "-8.0C", 1),
        fit(LIGHT, "20240627-213101", "-8.0C", 2),
    ]);

    assert_eq!(listing[1].sequence_id, "20240626-010850");
    assert_eq!(listing[2].sequence_id, "20240627-213000");
    assert_eq!(listing[3].sequence_id, "20240627-213000");
}

#[test]
fn test_equal_index_opens_new_sequence() {
    let listing = frames(&[
        fit(LIGHT, "20240626-010850", "-10.0C", 3),
        fit(LIGHT, "20240626-020850", "-10.0C", 3),
    ]);

    assert_ne!(listing[0].sequence_id, listing[1].sequence_id);
}

#[test]
fn test_set_change_opens_new_sequence() {
    let listing = frames(&[
        fit(LIGHT, "20240626-010850", "-10.0C", 1),
        fit(OTHER, "20240626-011850", "-10.0C", 2),
        fit(LIGHT, "20240626-012850", "-10.0C", 3),
    ]);

    assert_eq!(listing[0].sequence_id, "20240626-010850");
    assert_eq!(listing[1].sequence_id, "20240626-011850");
    // Interleaving another set breaks the run even if indices keep growing.
    assert_eq!(listing[2].sequence_id, "20240626-012850");
}

#[test]
fn test_sequence_ids_are_monotonic_within_a_run() {
    let names: Vec<String> = (1..=20)
        .map(|i| fit(LIGHT, &format!("20240626-0108{:02}", i + 10), "-10.0C", i))
        .collect();
    let listing = frames(&names);

    let first = &listing[0].sequence_id;
    assert!(listing.iter().all(|f| &f.sequence_id == first));
    assert!(listing
        .windows(2)
        .all(|w| w[0].frame_index < w[1].frame_index));
}
