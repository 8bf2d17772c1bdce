/// File name of the project document written at the project root.
pub const PROJECT_DOCUMENT_FILE: &str = "poto.json";

/// Schema version of the project document. Readers reject any other value.
pub const PROJECT_SCHEMA_VERSION: &str = "1.0";

/// Extension of the frame files produced by the camera controller.
pub const FRAME_EXTENSION: &str = "fit";

/// Suffix of the thumbnails the ASIAIR writes next to every frame.
pub const THUMBNAIL_SUFFIX: &str = "_thn.jpg";

/// OS artifacts that are never frames.
pub const OS_ARTIFACT_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Resource-fork leftovers start with this prefix (macOS on foreign filesystems).
pub const RESOURCE_FORK_PREFIX: &str = "._";

/// ASIAIR stores lights and flats under one (or both) of these directories.
pub const ASIAIR_AUTORUN_DIR: &str = "Autorun";
pub const ASIAIR_PLAN_DIR: &str = "Plan";

/// Directory holding the pooled darks and biases inside a project.
pub const CALIBRATION_POOL_DIR: &str = "any";

/// Separator between a set key and a sequence identifier.
pub const SEQUENCE_SEPARATOR: &str = "__";

/// `YYYYMMDD-HHMMSS`, used both for parsing filenames and for sequence ids.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Lowest dark temperature tolerance accepted from the operator, in °C.
pub const MIN_TEMPERATURE_TOLERANCE_C: f64 = 0.2;

/// Tolerance proposed to the operator when nothing else is configured, in °C.
pub const DEFAULT_TEMPERATURE_TOLERANCE_C: f64 = 3.0;

/// Absorbs float noise on one-decimal temperature readings.
pub const TEMPERATURE_EPSILON_C: f64 = 1e-6;

/// Prefix of the scripts generated from a template.
pub const GENERATED_SCRIPT_PREFIX: &str = "poto_";

/// Stacking executable invoked on generated scripts.
pub const DEFAULT_STACKER_EXECUTABLE: &str = "siril";

/// Placeholders substituted in script templates.
pub const SCRIPT_PLACEHOLDERS: &[&str] = &[
    "{{cwd}}",
    "{{lights}}",
    "{{flats}}",
    "{{darks}}",
    "{{biases}}",
    "{{process}}",
    "{{masters}}",
];

/// Milliseconds per minute, for integration totals.
pub const MS_PER_MINUTE: f64 = 60_000.0;
