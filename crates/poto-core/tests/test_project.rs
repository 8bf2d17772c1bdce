#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use tempfile::TempDir;

use common::{fit, frames};
use poto_core::consts::PROJECT_SCHEMA_VERSION;
use poto_core::error::PotoError;
use poto_core::layer_set::{build_layer_sets, LayerSet};
use poto_core::matching::{FramesByKind, LightFlatMatch, SequenceRef};
use poto_core::project::{ProjectDocument, ProjectMetrics};

fn sample_layer_sets() -> Vec<LayerSet> {
    let by_kind = FramesByKind::partition(frames(&[
        fit("Light_M31_60.0s_Bin1_H_gain100", "20240624-010850", "-10.0C", 1),
        fit("Light_M31_60.0s_Bin1_H_gain100", "20240624-010951", "-10.0C", 2),
        fit("Flat_810.0ms_Bin1_H_gain0", "20240624-094304", "-10.5C", 1),
    ]));
    let matches = vec![LightFlatMatch {
        light: SequenceRef {
            set_key: "Light_60.0s_Bin1_H_gain100".to_string(),
            sequence_id: "20240624-010850".to_string(),
        },
        flat: SequenceRef {
            set_key: "Flat_810.0ms_Bin1_H_gain0".to_string(),
            sequence_id: "20240624-094304".to_string(),
        },
        is_manual_match: false,
    }];
    let mut sets = build_layer_sets(&matches, &by_kind.lights, &by_kind.flats).unwrap();
    sets[0].attach_darks(frames(&[fit(
        "Dark_60.0s_Bin1_gain100",
        "20240708-120000",
        "-10.0C",
        1,
    )]));
    sets
}

#[test]
fn test_metrics_sum_layer_sets() {
    let mut sets = sample_layer_sets();
    sets.push(sets[0].clone());

    let metrics = ProjectMetrics::from_layer_sets(&sets);
    assert_eq!(metrics.total_lights, 4);
    assert_eq!(metrics.total_flats, 2);
    assert_eq!(metrics.total_darks, 2);
    assert_eq!(metrics.total_biases, 0);
    assert_relative_eq!(metrics.cumulated_light_integration_minutes, 4.0);
    assert_relative_eq!(metrics.cumulated_dark_integration_minutes, 2.0);
}

#[test]
fn test_document_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let document = ProjectDocument::new(sample_layer_sets());

    let path = document.write(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("poto.json"));

    let read = ProjectDocument::read(dir.path()).unwrap();
    assert_eq!(read, document);
}

fn short_exposure_layer_sets(count: u32) -> Vec<LayerSet> {
    let mut names: Vec<String> = (1..=count)
        .map(|i| fit("Light_M31_1.7s_Bin1_H_gain100", "20240624-010850", "-10.0C", i))
        .collect();
    names.push(fit("Flat_810.0ms_Bin1_H_gain0", "20240624-094304", "-10.5C", 1));
    let by_kind = FramesByKind::partition(frames(&names));
    let matches = vec![LightFlatMatch {
        light: SequenceRef {
            set_key: "Light_1.7s_Bin1_H_gain100".to_string(),
            sequence_id: "20240624-010850".to_string(),
        },
        flat: SequenceRef {
            set_key: "Flat_810.0ms_Bin1_H_gain0".to_string(),
            sequence_id: "20240624-094304".to_string(),
        },
        is_manual_match: false,
    }];
    build_layer_sets(&matches, &by_kind.lights, &by_kind.flats).unwrap()
}

#[test]
fn test_fractional_integration_totals_survive_json() {
    let document = ProjectDocument::new(short_exposure_layer_sets(7));
    let read = ProjectDocument::from_json(&document.to_json().unwrap()).unwrap();
    assert_eq!(read, document);

    for count in 1..200 {
        let document = ProjectDocument::new(short_exposure_layer_sets(count));
        let read = ProjectDocument::from_json(&document.to_json().unwrap()).unwrap();
        assert_eq!(
            read.layer_sets[0].light_total_integration_minutes,
            document.layer_sets[0].light_total_integration_minutes,
            "{count} lights"
        );
        assert_eq!(read, document, "{count} lights");
    }
}

#[test]
fn test_json_uses_camel_case_fields() {
    let document = ProjectDocument::new(sample_layer_sets());
    let json = document.to_json().unwrap();

    assert!(json.contains("\"schemaVersion\""));
    assert!(json.contains("\"generatedAt\""));
    assert!(json.contains("\"layerSetId\""));
    assert!(json.contains("\"projectRelativePath\""));
    assert!(json.contains("\"sourceFilePath\""));
    assert!(json.contains("\"kind\": \"Light\""));
    assert!(json.contains("\"darkSetKey\": \"Dark_60.0s_Bin1_gain100\""));
    assert!(json.contains("\"biasSetKey\": null"));
}

#[test]
fn test_schema_version_mismatch() {
    let document = ProjectDocument::new(sample_layer_sets());
    let json = document
        .to_json()
        .unwrap()
        .replace(
            &format!("\"schemaVersion\": \"{PROJECT_SCHEMA_VERSION}\""),
            "\"schemaVersion\": \"0.1\"",
        );

    match ProjectDocument::from_json(&json) {
        Err(PotoError::SchemaVersionMismatch { expected, found }) => {
            assert_eq!(expected, PROJECT_SCHEMA_VERSION);
            assert_eq!(found, "0.1");
        }
        other => panic!("expected a version mismatch, got {other:?}"),
    }
}

#[test]
fn test_older_layout_reports_version_first() {
    let err = ProjectDocument::from_json(r#"{"potoVersion": "0.3", "layerSets": []}"#).unwrap_err();
    assert!(matches!(err, PotoError::SchemaVersionMismatch { .. }));
}

#[test]
fn test_missing_document_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ProjectDocument::read(dir.path()).unwrap_err();
    assert!(matches!(err, PotoError::Io(_)));
}
