//! Collaborators the engine notifies. Implementations live outside the
//! core (haptics, persistence, UI refresh) and are handed to
//! [`crate::engine::Engine`] at construction.

use std::sync::{Arc, Mutex, PoisonError};

use crate::session::{RoundResult, SessionSummary};

/// Best-effort feedback for player interactions, e.g. a haptic tap when a
/// card is held. Must not block.
pub trait Feedback: Send {
    fn hold_toggled(&mut self, position: usize, held: bool);
}

/// Receives immutable snapshots of finished rounds and sessions.
pub trait RoundSink: Send {
    fn round_completed(&mut self, result: &RoundResult);

    fn session_completed(&mut self, _summary: &SessionSummary) {}
}

/// Lets one sink outlive a single engine, e.g. a log shared by every
/// session of a simulation. A lock poisoned by a panicking holder is
/// recovered so no record is lost.
impl<T: RoundSink> RoundSink for Arc<Mutex<T>> {
    fn round_completed(&mut self, result: &RoundResult) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .round_completed(result);
    }

    fn session_completed(&mut self, summary: &SessionSummary) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .session_completed(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandCategory;

    #[derive(Default)]
    struct Count(u32);

    impl RoundSink for Count {
        fn round_completed(&mut self, _result: &RoundResult) {
            self.0 += 1;
        }
    }

    fn result() -> RoundResult {
        RoundResult {
            round: 1,
            hand: Vec::new(),
            category: HandCategory::NoWin,
            bet: 1,
            payout: 0,
            credits_after: 99,
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn shared_sink_survives_a_poisoned_lock() {
        let shared = Arc::new(Mutex::new(Count::default()));
        let poisoner = Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("sink holder panicked");
        })
        .join();
        assert!(shared.is_poisoned());

        let mut sink = Arc::clone(&shared);
        sink.round_completed(&result());
        let count = shared.lock().unwrap_or_else(PoisonError::into_inner).0;
        assert_eq!(count, 1);
    }
}
