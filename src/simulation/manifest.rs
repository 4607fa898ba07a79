//! Parameter manifest written alongside an exported dataset
//!
//! The manifest records everything needed to regenerate a dataset: the run
//! identifier, the seed, the effective settings and the holiday calendar.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::simulation::SimulationResult;
use crate::types::{RunId, StoreSettings};

/// Description of one generated dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Unique identifier of the run
    pub run_id: RunId,
    /// When the manifest was created
    pub generated_at: DateTime<Utc>,
    /// Seed the run used
    pub seed: u64,
    /// Holiday calendar name and version
    pub calendar: String,
    /// First generated date
    pub start_date: NaiveDate,
    /// Last generated date
    pub end_date: NaiveDate,
    /// Number of records in the dataset
    pub record_count: usize,
    /// Effective settings, with the seed filled in
    pub settings: StoreSettings,
}

impl DatasetManifest {
    /// Manifest path for an output file: `<output>.manifest.json`
    pub fn path_for(output: &str) -> PathBuf {
        PathBuf::from(format!("{}.manifest.json", output))
    }

    /// Write the manifest as pretty JSON
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> SimulationResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Read a manifest back
    pub fn read_from<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
