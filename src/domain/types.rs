//! Shared types for the rep-counting core

use serde::{Deserialize, Serialize};

/// Number of elements in the classifier feature vector:
/// three joints x three coordinates, plus the elbow angle.
pub const FEATURE_LEN: usize = 10;

/// MediaPipe pose landmark index for the left shoulder.
pub const LEFT_SHOULDER: usize = 11;
/// MediaPipe pose landmark index for the left elbow.
pub const LEFT_ELBOW: usize = 13;
/// MediaPipe pose landmark index for the left wrist.
pub const LEFT_WRIST: usize = 15;

/// A 3-D body landmark in normalized image space.
///
/// x and y are in [0, 1]; z is a unit-less relative depth estimate.
/// Produced once per frame by the external pose engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl JointPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All coordinates are finite (pose engines occasionally emit NaN
    /// on partial detections).
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Binary classification of arm position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseLabel {
    Up,
    Down,
}

impl PoseLabel {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PoseLabel::Up => "up",
            PoseLabel::Down => "down",
        }
    }

    /// The opposite label, used by callers that toggle between poses.
    #[inline]
    pub fn toggled(&self) -> Self {
        match self {
            PoseLabel::Up => PoseLabel::Down,
            PoseLabel::Down => PoseLabel::Up,
        }
    }
}

impl std::fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PoseLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(PoseLabel::Up),
            "down" => Ok(PoseLabel::Down),
            other => Err(format!("unknown pose label: {other}")),
        }
    }
}

/// Landmark indices for the three tracked joints.
///
/// Defaults match the MediaPipe pose model (left arm).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkIndices {
    pub shoulder: usize,
    pub elbow: usize,
    pub wrist: usize,
}

impl Default for LandmarkIndices {
    fn default() -> Self {
        Self { shoulder: LEFT_SHOULDER, elbow: LEFT_ELBOW, wrist: LEFT_WRIST }
    }
}

/// One frame of pose-engine output: a sequence of landmarks, or empty
/// when no person was detected.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    landmarks: Vec<JointPosition>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<JointPosition>) -> Self {
        Self { landmarks }
    }

    /// Frame with no detection.
    pub fn empty() -> Self {
        Self { landmarks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Get a landmark by index, filtering out malformed coordinates.
    pub fn get(&self, index: usize) -> Option<JointPosition> {
        self.landmarks.get(index).copied().filter(JointPosition::is_well_formed)
    }
}

/// The three joints of the tracked arm, extracted from one frame.
///
/// Field names serialize in the sample-export format (`leftShoulder` etc.)
/// consumed by the training collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmJoints {
    #[serde(rename = "leftShoulder")]
    pub shoulder: JointPosition,
    #[serde(rename = "leftElbow")]
    pub elbow: JointPosition,
    #[serde(rename = "leftWrist")]
    pub wrist: JointPosition,
}

impl ArmJoints {
    /// Extract the tracked joints from a frame.
    ///
    /// Returns `None` when any of the three landmarks is missing or
    /// malformed - pose detection dropout is expected and frequent, so
    /// this is a skip condition rather than an error.
    pub fn from_frame(frame: &LandmarkFrame, indices: LandmarkIndices) -> Option<Self> {
        Some(Self {
            shoulder: frame.get(indices.shoulder)?,
            elbow: frame.get(indices.elbow)?,
            wrist: frame.get(indices.wrist)?,
        })
    }

    /// Build the classifier input vector:
    /// `[sx, sy, sz, ex, ey, ez, wx, wy, wz, angle]`.
    pub fn feature_vector(&self, angle: f64) -> [f64; FEATURE_LEN] {
        [
            self.shoulder.x,
            self.shoulder.y,
            self.shoulder.z,
            self.elbow.x,
            self.elbow.y,
            self.elbow.z,
            self.wrist.x,
            self.wrist.y,
            self.wrist.z,
            angle,
        ]
    }
}

/// One classified frame, produced by the classifier collaborator and
/// consumed immediately by the rep counter. Transient, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationEvent {
    pub label: PoseLabel,
    pub joints: ArmJoints,
}

/// A rep-count advance ready for the persistence layer.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutUpdate {
    pub username: String,
    pub reps: u32,
    pub ts: chrono::DateTime<chrono::Utc>,
}
