//! Training sample data model
//!
//! A `PoseSample` is one labeled observation (angle + joint coordinates)
//! captured during data collection. Its serde representation is exactly the
//! portable export format consumed by the training collaborator:
//!
//! `{angle, pose: "up"|"down", timestamp: ISO-8601, landmarks: {...}}`

use crate::domain::error::{CoreError, CoreResult};
use crate::domain::types::{ArmJoints, PoseLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One labeled observation used to train the classifier.
///
/// Invariant: `angle` is the geometry function's value on `joints` at
/// creation time - it is never recomputed or mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    pub angle: f64,
    #[serde(rename = "pose")]
    pub label: PoseLabel,
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
    #[serde(rename = "landmarks")]
    pub joints: ArmJoints,
}

impl PoseSample {
    pub fn new(angle: f64, label: PoseLabel, captured_at: DateTime<Utc>, joints: ArmJoints) -> Self {
        Self { angle, label, captured_at, joints }
    }
}

/// An ordered set of samples sharing one label, insertion order = capture
/// order. Produced as an owned snapshot by the collector's export; further
/// collection does not mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    label: PoseLabel,
    samples: Vec<PoseSample>,
}

impl SampleSet {
    /// Build a set from captured samples, validating the single-label
    /// invariant.
    ///
    /// Fails with `EmptyData` for an empty input (mixing labels requires
    /// two separate sets, one per label, matching the two-file training
    /// workflow).
    pub fn from_samples(samples: Vec<PoseSample>) -> CoreResult<Self> {
        let Some(first) = samples.first() else {
            return Err(CoreError::EmptyData);
        };
        let label = first.label;

        if let Some(mixed) = samples.iter().find(|s| s.label != label) {
            return Err(CoreError::invalid_state(format!(
                "sample set mixes labels {} and {}",
                label, mixed.label
            )));
        }

        Ok(Self { label, samples })
    }

    /// The label shared by every sample in the set.
    #[inline]
    pub fn label(&self) -> PoseLabel {
        self.label
    }

    #[inline]
    pub fn samples(&self) -> &[PoseSample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PoseSample> {
        self.samples.iter()
    }
}
