//! Sample export - writes collected sample sets to JSON files
//!
//! The on-disk form is a pretty-printed JSON array of sample objects, the
//! portable format the training collaborator consumes. One file per label,
//! named `pose_data_{label}_{timestamp}.json`.

use crate::domain::error::CoreResult;
use crate::domain::sample::{PoseSample, SampleSet};
use crate::domain::types::PoseLabel;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for an export taken at `now`, e.g.
/// `pose_data_up_2024-03-01T12:00:00Z.json`.
pub fn export_file_name(label: PoseLabel, now: DateTime<Utc>) -> String {
    format!("pose_data_{}_{}.json", label, now.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Write a sample set to `path` as a JSON array.
///
/// Creates parent directories as needed.
pub fn write_samples<P: AsRef<Path>>(path: P, set: &SampleSet) -> CoreResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(set.samples())?;
    fs::write(path, json)?;

    info!(
        path = %path.display(),
        label = %set.label(),
        samples = %set.len(),
        "export_written"
    );
    Ok(())
}

/// Read a sample set back from a JSON export file.
///
/// Validates the single-label invariant; an empty array fails with
/// `EmptyData`.
pub fn read_samples<P: AsRef<Path>>(path: P) -> CoreResult<SampleSet> {
    let content = fs::read_to_string(path.as_ref())?;
    let samples: Vec<PoseSample> = serde_json::from_str(&content)?;
    SampleSet::from_samples(samples)
}

/// Exporter bound to a target directory.
pub struct SampleExporter {
    dir: PathBuf,
}

impl SampleExporter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        info!(dir = %dir.display(), "exporter_initialized");
        Self { dir }
    }

    /// Write a sample set into the export directory using the standard
    /// file name. Returns the path written.
    pub fn export(&self, set: &SampleSet, now: DateTime<Utc>) -> CoreResult<PathBuf> {
        let path = self.dir.join(export_file_name(set.label(), now));
        write_samples(&path, set)?;
        Ok(path)
    }
}
