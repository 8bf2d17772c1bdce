use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STACKER_EXECUTABLE, DEFAULT_TEMPERATURE_TOLERANCE_C};

/// User settings, read from `poto.toml`. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotoConfig {
    /// Tolerance proposed when asking for the dark temperature window, in °C.
    pub default_temperature_tolerance: f64,
    /// Executable run on every generated script, with `-s <script>`.
    pub stacker_executable: String,
}

impl Default for PotoConfig {
    fn default() -> Self {
        Self {
            default_temperature_tolerance: DEFAULT_TEMPERATURE_TOLERANCE_C,
            stacker_executable: DEFAULT_STACKER_EXECUTABLE.to_string(),
        }
    }
}
