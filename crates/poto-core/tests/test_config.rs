use approx::assert_relative_eq;

use poto_core::config::PotoConfig;
use poto_core::matching::TemperatureTolerance;

// ---------------------------------------------------------------------------
// PotoConfig defaults
// ---------------------------------------------------------------------------

#[test]
fn test_config_defaults() {
    let config = PotoConfig::default();
    assert_relative_eq!(config.default_temperature_tolerance, 3.0);
    assert_eq!(config.stacker_executable, "siril");
}

#[test]
fn test_config_missing_fields_take_defaults() {
    let config: PotoConfig =
        serde_json::from_str(r#"{"stacker_executable": "/opt/siril-cli"}"#).unwrap();
    assert_eq!(config.stacker_executable, "/opt/siril-cli");
    assert_relative_eq!(config.default_temperature_tolerance, 3.0);

    let empty: PotoConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, PotoConfig::default());
}

// ---------------------------------------------------------------------------
// TemperatureTolerance
// ---------------------------------------------------------------------------

#[test]
fn test_default_tolerance_is_valid() {
    let tolerance =
        TemperatureTolerance::new(PotoConfig::default().default_temperature_tolerance).unwrap();
    assert_eq!(tolerance.to_string(), "±3°C");
}
