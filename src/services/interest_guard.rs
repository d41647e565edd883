use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Admits at most one outstanding send-interest request per
/// (sender, receiver) pair. A second attempt while one is in flight is
/// refused before any backend call is made. The lock is only held to mutate
/// the set, never across an await.
#[derive(Clone, Default)]
pub struct InterestSendGuard {
    in_flight: Arc<Mutex<HashSet<(i64, i64)>>>,
}

impl InterestSendGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for this pair. Returns false when a send is already in
    /// flight; the caller must not start another request.
    pub fn begin(&self, sender_id: i64, receiver_id: i64) -> bool {
        self.in_flight
            .lock()
            .unwrap()
            .insert((sender_id, receiver_id))
    }

    /// Release the slot once the request resolved, success or failure.
    pub fn finish(&self, sender_id: i64, receiver_id: i64) {
        self.in_flight
            .lock()
            .unwrap()
            .remove(&(sender_id, receiver_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_send_to_same_candidate_is_refused_until_first_resolves() {
        let guard = InterestSendGuard::new();

        assert!(guard.begin(10, 22));
        assert!(!guard.begin(10, 22));

        guard.finish(10, 22);
        assert!(guard.begin(10, 22));
    }

    #[test]
    fn different_candidates_do_not_block_each_other() {
        let guard = InterestSendGuard::new();

        assert!(guard.begin(10, 21));
        assert!(guard.begin(10, 22));
    }

    #[test]
    fn different_senders_to_same_candidate_are_independent() {
        let guard = InterestSendGuard::new();

        assert!(guard.begin(10, 22));
        assert!(guard.begin(11, 22));
    }
}
