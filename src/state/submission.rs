//! Submission state shared by the busy surface and the orchestrator

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Where an orchestrator run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    ValidatingLocal,
    VerifyingRemote,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ValidatingLocal => "validating_local",
            Self::VerifyingRemote => "verifying_remote",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Busy flag and phase of one form.
///
/// Cloning shares the underlying state, so the busy surface and the
/// orchestrator of the same form always agree on it.
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    busy: Arc<AtomicBool>,
    phase: Arc<Mutex<SubmissionPhase>>,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claim the busy flag; `false` when another run already holds it
    pub fn try_begin(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn set_submitting(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }

    pub fn phase(&self) -> SubmissionPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Move to `next`, returning the phase that was left
    pub fn transition(&self, next: SubmissionPhase) -> SubmissionPhase {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        let previous = *phase;
        *phase = next;
        tracing::debug!(from = %previous, to = %next, "submission transition");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let state = SubmissionState::new();
        assert!(!state.is_submitting());
        assert_eq!(state.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_clones_share_state() {
        let state = SubmissionState::new();
        let other = state.clone();
        state.set_submitting(true);
        state.transition(SubmissionPhase::Submitting);
        assert!(other.is_submitting());
        assert_eq!(other.phase(), SubmissionPhase::Submitting);
    }

    #[test]
    fn test_transition_returns_previous() {
        let state = SubmissionState::new();
        assert_eq!(
            state.transition(SubmissionPhase::ValidatingLocal),
            SubmissionPhase::Idle
        );
        assert_eq!(
            state.transition(SubmissionPhase::Failed),
            SubmissionPhase::ValidatingLocal
        );
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(SubmissionPhase::VerifyingRemote.to_string(), "verifying_remote");
        assert_eq!(SubmissionPhase::Idle.label(), "idle");
    }

    #[test]
    fn test_try_begin_claims_once() {
        let state = SubmissionState::new();
        let other = state.clone();
        assert!(state.try_begin());
        assert!(!other.try_begin());
        assert!(state.is_submitting());

        state.set_submitting(false);
        assert!(other.try_begin());
    }

    #[test]
    fn test_try_begin_across_threads() {
        let state = SubmissionState::new();
        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| state.try_begin()))
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap_or(false)))
                .sum()
        });
        assert_eq!(winners, 1);
    }
}
