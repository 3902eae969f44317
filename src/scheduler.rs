//! Deferred-callback port wrapping browser timers.
//!
//! The filter panel's toggle cool-down needs a "run this later" primitive.
//! Going through [`Scheduler`] instead of `setTimeout` directly lets tests
//! drive virtual time forward deterministically.

use gloo_timers::callback::Timeout;

/// Schedules a callback to run once after `delay_ms`.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

/// Browser scheduler backed by `gloo_timers::callback::Timeout`.
#[derive(Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}

/// Virtual-time scheduler for tests. Callbacks queue with an absolute due
/// time and fire when [`ManualScheduler::advance`] moves the clock past it.
#[cfg(test)]
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: std::cell::Cell<u64>,
    queue: std::cell::RefCell<Vec<(u64, Box<dyn FnOnce()>)>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves virtual time forward, firing every callback that came due.
    pub fn advance(&self, delta_ms: u64) {
        let now = self.now_ms.get() + delta_ms;
        self.now_ms.set(now);
        loop {
            // Pop one due callback at a time so a callback may reschedule.
            let due = {
                let mut queue = self.queue.borrow_mut();
                match queue.iter().position(|(at, _)| *at <= now) {
                    Some(idx) => Some(queue.remove(idx)),
                    None => None,
                }
            };
            match due {
                Some((_, callback)) => callback(),
                None => break,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let due = self.now_ms.get() + u64::from(delay_ms);
        self.queue.borrow_mut().push((due, callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn manual_scheduler_fires_only_once_due() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let flag = fired.clone();
        scheduler.after(300, Box::new(move || flag.set(true)));

        scheduler.advance(299);
        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(1);
        assert!(fired.get());
        assert_eq!(scheduler.pending(), 0);
    }
}
