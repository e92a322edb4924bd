//! Miscellaneous helper types around controlling the timing of events.
//!
//! The game never blocks: anything that has to happen "later" is a [`Wakeup`] handed to a [`Scheduler`], and whoever
//! owns the scheduler feeds it back into [`GameController::advance`](crate::GameController::advance) once it's due.

use std::{cmp::Ordering, collections::BinaryHeap, time::Duration};

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

/// Which deferred step of a game a [`Wakeup`] is for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WakeupKind {
    /// The reveal pause is over; hide the ball and start shuffling.
    EndReveal,
    /// Time for the next swap.
    ShuffleStep,
    /// The guess has been shown long enough; go back to idle.
    Reset,
}

/// A deferred callback into the game controller.
///
/// `epoch` identifies the game that scheduled it. A wakeup from an older game is stale and gets dropped, so timers
/// left over from an abandoned run can't touch the current one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Wakeup {
    pub epoch: u64,
    pub kind: WakeupKind,
}

/// Deferred, non-blocking execution.
///
/// There's no cancellation. Wakeups scheduled with equal delays must come back in the order they were scheduled.
pub trait Scheduler {
    /// Have `wakeup` delivered once, after at least `delay` has passed.
    fn after(&mut self, delay: Duration, wakeup: Wakeup);
}

struct Entry {
    due: Instant,
    seq: u64,
    wakeup: Wakeup,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    // reversed, so the `BinaryHeap` (a max-heap) pops the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A [`Scheduler`] backed by a deadline-ordered queue.
///
/// Nothing fires on its own; the game loop asks for whatever's [due](Self::pop_due). Tests and the simulator can
/// also skip the waiting entirely with [`Self::pop_next`].
#[derive(Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// When the earliest pending wakeup is due, if there is one.
    pub fn next_due(&self) -> Option<Instant> {
        self.heap.peek().map(|e| e.due)
    }

    /// How long until the earliest pending wakeup is due. Zero if it's overdue, `None` if nothing's pending.
    pub fn until_next(&self) -> Option<Duration> {
        self.next_due()
            .map(|due| due.checked_duration_since(Instant::now()).unwrap_or(Duration::ZERO))
    }

    /// Pop the earliest wakeup, if it's due by `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Wakeup> {
        match self.heap.peek() {
            Some(e) if e.due <= now => self.heap.pop().map(|e| e.wakeup),
            _ => None,
        }
    }

    /// Pop the earliest wakeup whether or not it's due, along with when it was supposed to fire.
    pub fn pop_next(&mut self) -> Option<(Instant, Wakeup)> {
        self.heap.pop().map(|e| (e.due, e.wakeup))
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay: Duration, wakeup: Wakeup) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry {
            due: Instant::now() + delay,
            seq,
            wakeup,
        });
    }
}

/// Keeps track of time between relatively steady pulses.
///
/// Ticks try to stay lined up with the original tick, but if [`Self::tick_ready`] is called more than half a period
/// late, the next tick will be reset relative to the current time instead.
pub struct Timer {
    next: Instant,
    period: Duration,
}

impl Timer {
    /// Create a new timer with the given period. The first tick is right now.
    pub fn new(period: Duration) -> Self {
        Self {
            next: Instant::now(),
            period,
        }
    }

    /// How much time is left before the timer ticks over. Minimum zero.
    pub fn remaining(&self) -> Duration {
        self.next
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::ZERO)
    }

    fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next + self.period / 2 {
            self.next = self.next + self.period;
        } else {
            self.next = now + self.period;
        }
    }

    /// Check whether we've ticked yet; if so, reset the timer. Useful for ratelimiting.
    pub fn tick_ready(&mut self) -> bool {
        if Instant::now() >= self.next {
            self.tick();
            true
        } else {
            false
        }
    }
}
