use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{PROJECT_DOCUMENT_FILE, PROJECT_SCHEMA_VERSION};
use crate::error::{PotoError, Result};
use crate::layer_set::LayerSet;

/// Totals shown before dispatch and stored with the project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetrics {
    pub total_lights: usize,
    pub total_flats: usize,
    pub total_darks: usize,
    pub total_biases: usize,
    pub cumulated_light_integration_minutes: f64,
    pub cumulated_dark_integration_minutes: f64,
}

impl ProjectMetrics {
    pub fn from_layer_sets(layer_sets: &[LayerSet]) -> Self {
        layer_sets.iter().fold(Self::default(), |mut m, ls| {
            m.total_lights += ls.light_total_count;
            m.total_flats += ls.flats_count;
            m.total_darks += ls.darks_count;
            m.total_biases += ls.biases_count;
            m.cumulated_light_integration_minutes += ls.light_total_integration_minutes;
            m.cumulated_dark_integration_minutes += ls.dark_total_integration_minutes;
            m
        })
    }
}

/// The `poto.json` document at the root of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub generated_at: DateTime<Utc>,
    pub schema_version: String,
    pub metrics: ProjectMetrics,
    pub layer_sets: Vec<LayerSet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionProbe {
    schema_version: Option<String>,
}

impl ProjectDocument {
    pub fn new(layer_sets: Vec<LayerSet>) -> Self {
        Self {
            generated_at: Utc::now(),
            schema_version: PROJECT_SCHEMA_VERSION.to_string(),
            metrics: ProjectMetrics::from_layer_sets(&layer_sets),
            layer_sets,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document. The version is checked before the body so that an
    /// older layout reports a version mismatch instead of a missing field.
    pub fn from_json(json: &str) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        let found = probe.schema_version.unwrap_or_default();
        if found != PROJECT_SCHEMA_VERSION {
            return Err(PotoError::SchemaVersionMismatch {
                expected: PROJECT_SCHEMA_VERSION.to_string(),
                found,
            });
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn document_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_DOCUMENT_FILE)
    }

    pub fn write(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = Self::document_path(project_dir);
        fs::write(&path, self.to_json()?)?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn read(project_dir: &Path) -> Result<Self> {
        let path = Self::document_path(project_dir);
        let json = fs::read_to_string(&path)?;
        Self::from_json(&json)
    }
}
