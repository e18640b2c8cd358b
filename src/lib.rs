//! repcount - domain core of an exercise-repetition counter
//!
//! Turns per-frame body-landmark coordinates into labeled training samples,
//! and a classifier's noisy per-frame "up"/"down" output into a debounced,
//! monotonically increasing repetition count with transient feedback.
//! Pose estimation and classifier inference are external collaborators,
//! reached only through the `PoseClassifier` trait and `LandmarkFrame`
//! input type.
//!
//! Module structure:
//! - `domain/` - core types (samples, labels, frames, errors)
//! - `services/` - business logic (geometry, collector, rep counter, session)
//! - `io/` - persistence surfaces (sample export files, leaderboard store)
//! - `infra/` - infrastructure (config)

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
