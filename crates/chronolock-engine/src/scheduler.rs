//! Scheduled-unlock delivery.
//!
//! The scheduler accepts `(fire_time, payload)` pairs and guarantees the
//! payload is delivered **at or after** its fire time, at least once.
//! Delivery is pull-based: the host drives the engine's
//! [`run_scheduled`](crate::EscrowEngine::run_scheduled) on whatever cadence
//! it has (block boundary, timer tick, cron), and the engine drains what is
//! due.
//!
//! Payloads carry no authority. A delivered request re-enters the validated
//! unlock path, which re-checks existence and maturity against live state —
//! a stale fire time is never trusted.

use std::{cmp::Ordering, collections::BinaryHeap};

use chrono::{DateTime, Utc};
use chronolock_types::{ChainTag, OwnerId, Result};
use serde::{Deserialize, Serialize};

/// The callback payload for a scheduled unlock: which lock to try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequest {
    pub owner: OwnerId,
    pub chain: ChainTag,
}

/// Accepts `(fire_time, payload)` pairs for future unlock attempts.
pub trait UnlockScheduler {
    /// Register a callback to be delivered at or after `fire_at`.
    fn schedule(&mut self, fire_at: DateTime<Utc>, request: UnlockRequest) -> Result<()>;

    /// Pop every payload whose fire time has passed, in fire-time order.
    fn due(&mut self, now: DateTime<Utc>) -> Vec<UnlockRequest>;

    /// Number of callbacks still pending.
    fn pending(&self) -> usize;
}

/// Min-heap entry ordered by fire time (earliest first). Ties break on
/// insertion sequence so delivery order stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scheduled {
    fire_at: DateTime<Utc>,
    seq: u64,
    request: UnlockRequest,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest fire time
        // on top.
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// In-process [`UnlockScheduler`]: a delay queue over a binary heap.
///
/// Never delivers early; duplicates are allowed (at-least-once contract) —
/// the engine's maturity re-check absorbs them.
#[derive(Debug, Default)]
pub struct DelayQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl DelayQueue {
    /// Create a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl UnlockScheduler for DelayQueue {
    fn schedule(&mut self, fire_at: DateTime<Utc>, request: UnlockRequest) -> Result<()> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            fire_at,
            seq,
            request,
        });
        Ok(())
    }

    fn due(&mut self, now: DateTime<Utc>) -> Vec<UnlockRequest> {
        let mut ready = Vec::new();
        while let Some(top) = self.heap.peek() {
            if top.fire_at > now {
                break;
            }
            if let Some(entry) = self.heap.pop() {
                ready.push(entry.request);
            }
        }
        ready
    }

    fn pending(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn request(chain: &str) -> UnlockRequest {
        UnlockRequest {
            owner: OwnerId::new(),
            chain: ChainTag::new(chain),
        }
    }

    #[test]
    fn nothing_due_before_fire_time() {
        let mut queue = DelayQueue::new();
        queue.schedule(t0() + Duration::hours(24), request("osmosis")).unwrap();

        assert!(queue.due(t0()).is_empty());
        assert!(queue.due(t0() + Duration::hours(23)).is_empty());
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn due_at_exact_fire_time() {
        let mut queue = DelayQueue::new();
        let req = request("osmosis");
        queue.schedule(t0() + Duration::hours(24), req.clone()).unwrap();

        let ready = queue.due(t0() + Duration::hours(24));
        assert_eq!(ready, vec![req]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn due_delivers_in_fire_time_order() {
        let mut queue = DelayQueue::new();
        let late = request("late");
        let early = request("early");
        queue.schedule(t0() + Duration::hours(10), late.clone()).unwrap();
        queue.schedule(t0() + Duration::hours(2), early.clone()).unwrap();

        let ready = queue.due(t0() + Duration::hours(12));
        assert_eq!(ready, vec![early, late]);
    }

    #[test]
    fn ties_deliver_in_insertion_order() {
        let mut queue = DelayQueue::new();
        let first = request("first");
        let second = request("second");
        let fire = t0() + Duration::hours(1);
        queue.schedule(fire, first.clone()).unwrap();
        queue.schedule(fire, second.clone()).unwrap();

        assert_eq!(queue.due(fire), vec![first, second]);
    }

    #[test]
    fn popped_entries_do_not_redeliver() {
        let mut queue = DelayQueue::new();
        queue.schedule(t0(), request("osmosis")).unwrap();

        assert_eq!(queue.due(t0()).len(), 1);
        assert!(queue.due(t0() + Duration::hours(1)).is_empty());
    }

    #[test]
    fn undue_entries_survive_a_drain() {
        let mut queue = DelayQueue::new();
        queue.schedule(t0() + Duration::hours(1), request("a")).unwrap();
        queue.schedule(t0() + Duration::hours(5), request("b")).unwrap();

        assert_eq!(queue.due(t0() + Duration::hours(1)).len(), 1);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.due(t0() + Duration::hours(5)).len(), 1);
    }
}
