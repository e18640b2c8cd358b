//! Services - business logic and state management
//!
//! This module contains the core business logic:
//! - `geometry` - joint angle computation (leaf dependency, no state)
//! - `collector` - sample collection state machine for training data
//! - `rep_counter` - debounced repetition counting from classified frames
//! - `session` - workout session orchestration (frames to count advances)

pub mod collector;
pub mod geometry;
pub mod rep_counter;
pub mod session;

// Re-export commonly used types
pub use collector::SampleCollector;
pub use geometry::joint_angle_degrees;
pub use rep_counter::RepCounter;
pub use session::{PoseClassifier, WorkoutSession};
