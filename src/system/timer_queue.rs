//! One-shot timer queue
//!
//! Callbacks are plain [`TimerEvent`] values with a deadline. They fire once,
//! in deadline order (ties in submission order), and cannot be withdrawn once
//! queued.

use core::cmp::Ordering;

use embassy_time::{Duration, Instant};
use heapless::{
    binary_heap::{BinaryHeap, Min},
    Vec,
};

use super::event::TimerEvent;
use crate::Error;

/// Submits one-shot timer events
pub trait Scheduler {
    /// Fire `event` once after `delay`
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> Result<(), Error>;
}

/// Queued timer, ordered by deadline then submission
#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Instant,
    seq: u32,
    event: TimerEvent,
}

impl Entry {
    fn key(&self) -> (Instant, u32) {
        (self.deadline, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Fixed capacity queue of pending one-shot timers
pub struct TimerQueue<const N: usize> {
    /// Reference point for relative delays
    now: Instant,
    seq: u32,
    heap: BinaryHeap<Entry, Min, N>,
}

impl<const N: usize> TimerQueue<N> {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current reference time of the queue
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Move the reference time forward. Delays scheduled afterwards are
    /// relative to `now`.
    pub fn set_now(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    /// Pending events in firing order
    pub fn pending(&self) -> impl Iterator<Item = (Instant, TimerEvent)> {
        let mut entries: Vec<Entry, N> = self.heap.iter().copied().collect();
        entries.sort_unstable();
        entries
            .into_iter()
            .map(|entry| (entry.deadline, entry.event))
    }

    /// Remove and return the earliest timer due at `now`.
    ///
    /// The queue's reference time moves to the timer's deadline, so events
    /// scheduled by its handler are relative to when it was due rather than
    /// when it was serviced.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerEvent> {
        if self.heap.peek()?.deadline > now {
            return None;
        }
        let entry = self.heap.pop()?;
        self.set_now(entry.deadline);
        Some(entry.event)
    }
}

impl<const N: usize> Scheduler for TimerQueue<N> {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> Result<(), Error> {
        self.heap
            .push(Entry {
                deadline: self.now + delay,
                seq: self.seq,
                event,
            })
            .map_err(|_| Error::TimerQueueFull)?;
        self.seq = self.seq.wrapping_add(1);
        Ok(())
    }
}
