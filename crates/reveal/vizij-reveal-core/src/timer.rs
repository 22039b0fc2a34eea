//! One-shot timers on the engine's virtual millisecond clock.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::ids::{IdAllocator, TargetId, TimerId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DueTimer {
    pub id: TimerId,
    pub target: TargetId,
    pub deadline_ms: u64,
}

/// Min-heap of pending timers ordered by deadline, then by scheduling order.
/// Timers fire once and cannot be cancelled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    ids: IdAllocator,
    heap: BinaryHeap<Reverse<(u64, TimerId, TargetId)>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline_ms: u64, target: TargetId) -> TimerId {
        let id = self.ids.alloc_timer();
        self.heap.push(Reverse((deadline_ms, id, target)));
        id
    }

    /// Pop the earliest timer whose deadline is `<= now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DueTimer> {
        match self.heap.peek() {
            Some(Reverse((deadline, _, _))) if *deadline <= now_ms => {}
            _ => return None,
        }
        self.heap
            .pop()
            .map(|Reverse((deadline_ms, id, target))| DueTimer {
                id,
                target,
                deadline_ms,
            })
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((d, _, _))| *d)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
