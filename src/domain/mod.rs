//! Domain models - core types for the rep-counting pipeline
//!
//! This module contains the canonical data types used throughout the crate:
//! - `JointPosition` / `LandmarkFrame` - pose-engine output for one frame
//! - `ArmJoints` - the three tracked joints of one frame
//! - `PoseLabel` / `ClassificationEvent` - per-frame classification
//! - `PoseSample` / `SampleSet` - labeled training data
//! - `CoreError` - typed failures for precondition violations

pub mod error;
pub mod sample;
pub mod types;

// Re-export commonly used types at module level
pub use error::{CoreError, CoreResult};
pub use sample::{PoseSample, SampleSet};
pub use types::{
    ArmJoints, ClassificationEvent, JointPosition, LandmarkFrame, LandmarkIndices, PoseLabel,
    WorkoutUpdate, FEATURE_LEN,
};
