//! Sample collection pipeline
//!
//! Turns a stream of (landmark frame, active label) into validated training
//! samples. Collection is label-at-a-time: a human operator holds one pose
//! for an interval, so the collector trusts the caller's label assignment
//! and performs no classification of its own.
//!
//! Key behaviors:
//! - `start` clears prior samples and fixes the label for the recording
//! - frames with missing/malformed joints are skipped, never errors
//! - relabeling mid-recording is a hard precondition violation
//! - `export` hands out an owned snapshot; later collection leaves it intact

use crate::domain::error::{CoreError, CoreResult};
use crate::domain::sample::{PoseSample, SampleSet};
use crate::domain::types::{ArmJoints, LandmarkFrame, LandmarkIndices, PoseLabel};
use crate::services::geometry::joint_angle_degrees;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Collection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Collecting,
}

/// State machine accumulating labeled pose samples.
pub struct SampleCollector {
    mode: Mode,
    /// Label applied to newly captured samples; fixed while collecting.
    active_label: PoseLabel,
    /// Samples from the current/most recent recording, capture order.
    samples: Vec<PoseSample>,
    indices: LandmarkIndices,
}

impl SampleCollector {
    pub fn new(indices: LandmarkIndices) -> Self {
        Self { mode: Mode::Idle, active_label: PoseLabel::Up, samples: Vec::new(), indices }
    }

    #[inline]
    pub fn is_collecting(&self) -> bool {
        self.mode == Mode::Collecting
    }

    #[inline]
    pub fn active_label(&self) -> PoseLabel {
        self.active_label
    }

    /// Number of samples accumulated so far.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Begin a recording under the given label.
    ///
    /// Clears any previously accumulated samples and fixes the label for
    /// the duration of the recording.
    pub fn start(&mut self, label: PoseLabel) -> CoreResult<()> {
        if self.mode == Mode::Collecting {
            return Err(CoreError::invalid_state("already recording"));
        }

        self.samples.clear();
        self.active_label = label;
        self.mode = Mode::Collecting;
        info!(label = %label, "collection_started");
        Ok(())
    }

    /// End the recording, leaving accumulated samples available for export.
    /// Returns the number of samples collected.
    pub fn stop(&mut self) -> CoreResult<usize> {
        if self.mode == Mode::Idle {
            return Err(CoreError::invalid_state("not recording"));
        }

        self.mode = Mode::Idle;
        info!(label = %self.active_label, samples = %self.samples.len(), "collection_stopped");
        Ok(self.samples.len())
    }

    /// Change the label used for the next recording.
    ///
    /// Only permitted while idle - the single-label invariant of a sample
    /// set makes mid-recording relabeling a precondition violation, not a
    /// recoverable retry.
    pub fn set_label(&mut self, label: PoseLabel) -> CoreResult<()> {
        if self.mode == Mode::Collecting {
            return Err(CoreError::invalid_state("stop recording before changing pose"));
        }

        self.active_label = label;
        Ok(())
    }

    /// Feed one frame of pose-engine output.
    ///
    /// No-op while idle. While collecting, requires all three tracked
    /// joints to be present and well-formed; a frame missing any of them
    /// is silently skipped (detection dropout is expected and frequent).
    /// On acceptance, appends exactly one sample - there is no partial
    /// mutation on a skipped frame.
    ///
    /// Returns the updated sample count.
    pub fn submit_frame(&mut self, frame: &LandmarkFrame, now: DateTime<Utc>) -> usize {
        if self.mode == Mode::Idle {
            return self.samples.len();
        }

        let Some(joints) = ArmJoints::from_frame(frame, self.indices) else {
            debug!("frame_skipped_missing_joints");
            return self.samples.len();
        };

        let angle = joint_angle_degrees(joints.shoulder, joints.elbow, joints.wrist);
        self.samples.push(PoseSample::new(angle, self.active_label, now, joints));

        debug!(
            label = %self.active_label,
            angle = %angle,
            samples = %self.samples.len(),
            "sample_recorded"
        );
        self.samples.len()
    }

    /// Export the accumulated samples as an owned snapshot.
    ///
    /// Fails with `EmptyData` when nothing has been collected. Continued
    /// collection does not mutate previously exported snapshots.
    pub fn export(&self) -> CoreResult<SampleSet> {
        SampleSet::from_samples(self.samples.clone())
    }
}

impl Default for SampleCollector {
    fn default() -> Self {
        Self::new(LandmarkIndices::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::JointPosition;

    fn full_frame() -> LandmarkFrame {
        let mut landmarks = vec![JointPosition::new(0.5, 0.5, 0.0); 33];
        landmarks[11] = JointPosition::new(0.0, 0.0, 0.0);
        landmarks[13] = JointPosition::new(0.0, 1.0, 0.0);
        landmarks[15] = JointPosition::new(1.0, 1.0, 0.0);
        LandmarkFrame::new(landmarks)
    }

    fn collector() -> SampleCollector {
        SampleCollector::default()
    }

    #[test]
    fn test_submit_while_idle_is_noop() {
        let mut collector = collector();

        let count = collector.submit_frame(&full_frame(), Utc::now());
        assert_eq!(count, 0);
        assert_eq!(collector.sample_count(), 0);
    }

    #[test]
    fn test_start_clears_previous_recording() {
        let mut collector = collector();

        collector.start(PoseLabel::Up).unwrap();
        collector.submit_frame(&full_frame(), Utc::now());
        collector.stop().unwrap();
        assert_eq!(collector.sample_count(), 1);

        collector.start(PoseLabel::Down).unwrap();
        assert_eq!(collector.sample_count(), 0);
        assert_eq!(collector.active_label(), PoseLabel::Down);
    }

    #[test]
    fn test_start_while_collecting_fails() {
        let mut collector = collector();

        collector.start(PoseLabel::Up).unwrap();
        assert!(matches!(collector.start(PoseLabel::Down), Err(CoreError::InvalidState(_))));
        // Active label untouched by the failed start
        assert_eq!(collector.active_label(), PoseLabel::Up);
    }

    #[test]
    fn test_stop_while_idle_fails() {
        let mut collector = collector();
        assert!(matches!(collector.stop(), Err(CoreError::InvalidState(_))));
    }

    #[test]
    fn test_accepted_frame_appends_one_sample() {
        let mut collector = collector();
        collector.start(PoseLabel::Up).unwrap();

        let count = collector.submit_frame(&full_frame(), Utc::now());
        assert_eq!(count, 1);

        let count = collector.submit_frame(&full_frame(), Utc::now());
        assert_eq!(count, 2);
    }

    #[test]
    fn test_sample_angle_matches_geometry() {
        let mut collector = collector();
        collector.start(PoseLabel::Down).unwrap();
        collector.submit_frame(&full_frame(), Utc::now());

        let set = collector.export().unwrap();
        // shoulder (0,0), elbow (0,1), wrist (1,1) is the right-angle fixture
        assert_eq!(set.samples()[0].angle, 90.0);
        assert_eq!(set.samples()[0].label, PoseLabel::Down);
    }

    #[test]
    fn test_empty_frame_skipped_without_mutation() {
        let mut collector = collector();
        collector.start(PoseLabel::Up).unwrap();

        let count = collector.submit_frame(&LandmarkFrame::empty(), Utc::now());
        assert_eq!(count, 0);

        // Short frame missing the wrist landmark
        let short = LandmarkFrame::new(vec![JointPosition::new(0.5, 0.5, 0.0); 14]);
        let count = collector.submit_frame(&short, Utc::now());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_set_label_while_collecting_fails() {
        let mut collector = collector();
        collector.start(PoseLabel::Up).unwrap();
        collector.submit_frame(&full_frame(), Utc::now());

        let result = collector.set_label(PoseLabel::Down);
        assert!(matches!(result, Err(CoreError::InvalidState(_))));

        // Label and accumulated samples unchanged
        assert_eq!(collector.active_label(), PoseLabel::Up);
        assert_eq!(collector.sample_count(), 1);
    }

    #[test]
    fn test_set_label_while_idle() {
        let mut collector = collector();
        collector.set_label(PoseLabel::Down).unwrap();
        assert_eq!(collector.active_label(), PoseLabel::Down);
    }

    #[test]
    fn test_export_empty_fails() {
        let collector = collector();
        assert!(matches!(collector.export(), Err(CoreError::EmptyData)));
    }

    #[test]
    fn test_export_snapshot_is_isolated() {
        let mut collector = collector();
        collector.start(PoseLabel::Up).unwrap();
        collector.submit_frame(&full_frame(), Utc::now());

        let snapshot = collector.export().unwrap();
        assert_eq!(snapshot.len(), 1);

        collector.submit_frame(&full_frame(), Utc::now());
        assert_eq!(collector.sample_count(), 2);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_export_available_after_stop() {
        let mut collector = collector();
        collector.start(PoseLabel::Down).unwrap();
        collector.submit_frame(&full_frame(), Utc::now());
        collector.stop().unwrap();

        let set = collector.export().unwrap();
        assert_eq!(set.label(), PoseLabel::Down);
        assert_eq!(set.len(), 1);
    }
}
