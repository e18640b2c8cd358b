//! Workout session orchestration
//!
//! Wires one user's live frame stream through feature extraction, the
//! external classifier and the rep counter, and surfaces count advances
//! for the persistence layer. Session state is owned here, not by the
//! view layer - the view only reads it.

use crate::domain::types::{
    ArmJoints, ClassificationEvent, LandmarkFrame, LandmarkIndices, PoseLabel, WorkoutUpdate,
    FEATURE_LEN,
};
use crate::infra::config::Config;
use crate::services::geometry::joint_angle_degrees;
use crate::services::rep_counter::RepCounter;
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Seam to the external inference engine.
///
/// Returns the probability that the arm is in the up position, or `None`
/// while the model is not ready (frames arriving before model load are
/// expected and simply dropped).
pub trait PoseClassifier {
    fn probability_up(&self, features: &[f64; FEATURE_LEN]) -> Option<f64>;
}

/// One user's workout session.
pub struct WorkoutSession {
    /// UUIDv7 session ID (time-sortable)
    sid: String,
    username: String,
    indices: LandmarkIndices,
    threshold: f64,
    counter: RepCounter,
}

impl WorkoutSession {
    pub fn new(username: &str, config: &Config) -> Self {
        let sid = Uuid::now_v7().to_string();
        info!(sid = %sid, username = %username, "session_started");
        Self {
            sid,
            username: username.to_string(),
            indices: config.landmark_indices(),
            threshold: config.classifier_threshold(),
            counter: RepCounter::with_feedback_ttl(config.feedback_ttl()),
        }
    }

    #[inline]
    pub fn session_id(&self) -> &str {
        &self.sid
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[inline]
    pub fn reps(&self) -> u32 {
        self.counter.count()
    }

    /// Label of the most recent classified frame.
    #[inline]
    pub fn current_label(&self) -> Option<PoseLabel> {
        self.counter.last_label()
    }

    /// Current feedback text, honoring the recorded expiry point.
    pub fn feedback(&self, now: Instant) -> Option<&'static str> {
        self.counter.feedback(now)
    }

    /// Process one frame of pose-engine output.
    ///
    /// Frames with missing joints or an unready classifier are dropped
    /// without touching the count. Returns a `WorkoutUpdate` when the
    /// frame completed a repetition, for fire-and-forget persistence.
    pub fn process_frame(
        &mut self,
        frame: &LandmarkFrame,
        classifier: &dyn PoseClassifier,
        now: Instant,
    ) -> Option<WorkoutUpdate> {
        let Some(joints) = ArmJoints::from_frame(frame, self.indices) else {
            debug!(sid = %self.sid, "frame_skipped_missing_joints");
            return None;
        };

        let angle = joint_angle_degrees(joints.shoulder, joints.elbow, joints.wrist);
        let features = joints.feature_vector(angle);

        let Some(probability) = classifier.probability_up(&features) else {
            debug!(sid = %self.sid, "frame_skipped_classifier_not_ready");
            return None;
        };

        let label =
            if probability > self.threshold { PoseLabel::Up } else { PoseLabel::Down };
        let event = ClassificationEvent { label, joints };

        if self.counter.observe(&event, now) {
            Some(WorkoutUpdate {
                username: self.username.clone(),
                reps: self.counter.count(),
                ts: Utc::now(),
            })
        } else {
            None
        }
    }

    /// Discard counting state while keeping the session identity.
    pub fn reset(&mut self) {
        self.counter.reset();
    }
}
