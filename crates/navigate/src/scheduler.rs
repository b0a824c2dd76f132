//! Virtual-time task scheduler.
//!
//! Tasks are `(due, seq, task)` entries. Ties on `due` fire in
//! insertion order. Nothing here touches a wall clock: the owner moves
//! time forward explicitly, so tests advance deterministically.

use std::collections::BTreeMap;
use std::time::Duration;

/// A queue of delayed tasks over a virtual clock.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let key = (self.now + delay, self.next_seq);
        self.next_seq += 1;
        self.pending.insert(key, task);
    }

    /// Due time of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest task due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let key = *self.pending.keys().next()?;
        if key.0 > until {
            return None;
        }
        self.now = self.now.max(key.0);
        self.pending.remove(&key)
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain `pop_due(until)` first; time never moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Drop every pending task matching `predicate`. Returns how many.
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.pending.len();
        self.pending.retain(|_, task| !predicate(task));
        before - self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_then_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(20), "late");
        scheduler.schedule(ms(10), "first");
        scheduler.schedule(ms(10), "second");

        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(ms(100)) {
            fired.push(task);
        }
        assert_eq!(fired, vec!["first", "second", "late"]);
        assert_eq!(scheduler.now(), ms(20));
    }

    #[test]
    fn test_pop_due_respects_window() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(50), 1);
        assert_eq!(scheduler.pop_due(ms(49)), None);
        assert_eq!(scheduler.next_deadline(), Some(ms(50)));
        assert_eq!(scheduler.pop_due(ms(50)), Some(1));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_schedule_relative_to_current_time() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(100));
        scheduler.schedule(ms(5), ());
        assert_eq!(scheduler.next_deadline(), Some(ms(105)));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.advance_to(ms(10));
        scheduler.advance_to(ms(5));
        assert_eq!(scheduler.now(), ms(10));
    }

    #[test]
    fn test_cancel_where() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(1), 1);
        scheduler.schedule(ms(2), 2);
        scheduler.schedule(ms(3), 3);
        assert_eq!(scheduler.cancel_where(|n| n % 2 == 1), 2);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pop_due(ms(10)), Some(2));
    }
}
