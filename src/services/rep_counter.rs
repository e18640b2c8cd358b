//! Rep-counting state machine
//!
//! Consumes per-frame classification results and maintains a monotonically
//! increasing repetition count plus transient feedback. The up-to-down
//! transition is the only path that advances the count, which debounces
//! duplicate same-label frames; there is no dwell-time or hysteresis
//! filtering beyond that, so rapid per-frame oscillation counts each
//! up-to-down edge. That matches the behavior the classifier was tuned
//! against and is a documented limitation.
//!
//! Timed feedback is modeled as data (an expiry point), not a scheduled
//! callback: the machine records when feedback lapses and the caller's
//! clock decides when to stop rendering it. No hidden timers.

use crate::domain::types::{ClassificationEvent, PoseLabel};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default lifetime of the rep-counted flash message.
pub const DEFAULT_FEEDBACK_TTL: Duration = Duration::from_millis(1000);

const FEEDBACK_REP_COUNTED: &str = "Rep counted!";
const FEEDBACK_GOING_UP: &str = "Good! Keep going up!";

/// Human-readable feedback with an optional expiry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Feedback {
    text: &'static str,
    /// `None` means the message persists until replaced.
    expires_at: Option<Instant>,
}

/// Mutable per-session counting state.
#[derive(Debug, Clone, Copy)]
struct RepState {
    count: u32,
    last_label: Option<PoseLabel>,
    feedback: Option<Feedback>,
}

impl RepState {
    fn new() -> Self {
        Self { count: 0, last_label: None, feedback: None }
    }
}

/// Per-frame rep counter.
///
/// Single-threaded and synchronous: exactly one event is processed at a
/// time, driven by the host's frame callback. `count` is non-decreasing
/// for the lifetime of one instance.
pub struct RepCounter {
    state: RepState,
    feedback_ttl: Duration,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::with_feedback_ttl(DEFAULT_FEEDBACK_TTL)
    }

    pub fn with_feedback_ttl(feedback_ttl: Duration) -> Self {
        Self { state: RepState::new(), feedback_ttl }
    }

    /// Completed repetitions so far.
    #[inline]
    pub fn count(&self) -> u32 {
        self.state.count
    }

    /// The label of the most recent observed event, `None` before the
    /// first classification arrives.
    #[inline]
    pub fn last_label(&self) -> Option<PoseLabel> {
        self.state.last_label
    }

    /// Current feedback text, or `None` once the caller's clock passes
    /// the recorded expiry point.
    pub fn feedback(&self, now: Instant) -> Option<&'static str> {
        let feedback = self.state.feedback?;
        match feedback.expires_at {
            Some(expires_at) if now >= expires_at => None,
            _ => Some(feedback.text),
        }
    }

    /// Apply one classification event.
    ///
    /// Returns `true` when the event completed a repetition. The
    /// up-then-down transition is the only increment path; a down event
    /// with no prior up (or a repeated down) changes nothing.
    pub fn observe(&mut self, event: &ClassificationEvent, now: Instant) -> bool {
        let mut counted = false;

        match (event.label, self.state.last_label) {
            (PoseLabel::Down, Some(PoseLabel::Up)) => {
                self.state.count += 1;
                self.state.feedback = Some(Feedback {
                    text: FEEDBACK_REP_COUNTED,
                    expires_at: Some(now + self.feedback_ttl),
                });
                counted = true;
                info!(count = %self.state.count, "rep_counted");
            }
            (PoseLabel::Up, last) if last != Some(PoseLabel::Up) => {
                // Entering the up phase; message persists until replaced
                self.state.feedback =
                    Some(Feedback { text: FEEDBACK_GOING_UP, expires_at: None });
                debug!("up_phase_entered");
            }
            _ => {}
        }

        self.state.last_label = Some(event.label);
        counted
    }

    /// Discard all state, as at the start of a new workout session.
    pub fn reset(&mut self) {
        self.state = RepState::new();
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ArmJoints, JointPosition};

    fn event(label: PoseLabel) -> ClassificationEvent {
        let joint = JointPosition::new(0.5, 0.5, 0.0);
        ClassificationEvent {
            label,
            joints: ArmJoints { shoulder: joint, elbow: joint, wrist: joint },
        }
    }

    fn feed(counter: &mut RepCounter, labels: &[PoseLabel], now: Instant) {
        for &label in labels {
            counter.observe(&event(label), now);
        }
    }

    use PoseLabel::{Down, Up};

    #[test]
    fn test_up_down_counts_one_rep() {
        let mut counter = RepCounter::new();
        let now = Instant::now();

        assert!(!counter.observe(&event(Up), now));
        assert!(counter.observe(&event(Down), now));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_duplicate_down_does_not_double_count() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Up, Down, Down, Down], Instant::now());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_full_cycles() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Down, Up, Down, Up, Down], Instant::now());
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_initial_down_is_not_a_rep() {
        let mut counter = RepCounter::new();
        assert!(!counter.observe(&event(Down), Instant::now()));
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.last_label(), Some(Down));
    }

    #[test]
    fn test_count_is_monotonic() {
        let mut counter = RepCounter::new();
        let now = Instant::now();
        let mut previous = 0;

        for &label in &[Up, Up, Down, Down, Up, Down, Up, Up, Down] {
            counter.observe(&event(label), now);
            assert!(counter.count() >= previous);
            previous = counter.count();
        }
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn test_up_phase_feedback_persists() {
        let mut counter = RepCounter::new();
        let now = Instant::now();

        counter.observe(&event(Up), now);
        assert_eq!(counter.feedback(now), Some("Good! Keep going up!"));
        // Non-expiring: still there long after
        assert_eq!(counter.feedback(now + Duration::from_secs(60)), Some("Good! Keep going up!"));
    }

    #[test]
    fn test_rep_feedback_expires_after_ttl() {
        let mut counter = RepCounter::new();
        let now = Instant::now();

        feed(&mut counter, &[Up, Down], now);
        assert_eq!(counter.feedback(now), Some("Rep counted!"));
        assert_eq!(counter.feedback(now + Duration::from_millis(999)), Some("Rep counted!"));
        assert_eq!(counter.feedback(now + Duration::from_millis(1000)), None);
    }

    #[test]
    fn test_repeated_up_keeps_feedback_unchanged() {
        let mut counter = RepCounter::new();
        let now = Instant::now();

        counter.observe(&event(Up), now);
        counter.observe(&event(Up), now);
        assert_eq!(counter.feedback(now), Some("Good! Keep going up!"));
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_rapid_oscillation_counts_every_edge() {
        // Known limitation: no smoothing beyond the transition rule
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Up, Down, Up, Down], Instant::now());
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut counter = RepCounter::new();
        let now = Instant::now();
        feed(&mut counter, &[Up, Down], now);

        counter.reset();
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.last_label(), None);
        assert_eq!(counter.feedback(now), None);
    }

    #[test]
    fn test_custom_feedback_ttl() {
        let mut counter = RepCounter::with_feedback_ttl(Duration::from_millis(250));
        let now = Instant::now();

        feed(&mut counter, &[Up, Down], now);
        assert_eq!(counter.feedback(now + Duration::from_millis(249)), Some("Rep counted!"));
        assert_eq!(counter.feedback(now + Duration::from_millis(250)), None);
    }
}
