//! One-shot timers for the UI thread.
//!
//! Timers never fire on their own: the host event loop calls
//! [`run_due_timers`] once per turn (tests call it after advancing a
//! [`TestClock`](crate::TestClock)).

use std::cell::RefCell;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::clock;

new_key_type! {
    pub struct TimerId;
}

struct Timer {
    deadline: Instant,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    timers: SlotMap<TimerId, Timer>,
    next_seq: u64,
}

impl TimerQueue {
    fn pop_due(&mut self, now: Instant) -> Option<Timer> {
        let id = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, _)| id)?;
        self.timers.remove(id)
    }
}

thread_local! {
    static TIMERS: RefCell<TimerQueue> = RefCell::new(TimerQueue::default());
}

/// Schedule `f` to run once `delay` has elapsed on the current clock.
pub fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) -> TimerId {
    let deadline = clock::now() + delay;
    TIMERS.with(|q| {
        let mut q = q.borrow_mut();
        let seq = q.next_seq;
        q.next_seq += 1;
        q.timers.insert(Timer {
            deadline,
            seq,
            callback: Box::new(f),
        })
    })
}

/// Cancel a pending timer. Returns `false` if it already fired or was cleared.
pub fn clear_timeout(id: TimerId) -> bool {
    TIMERS.with(|q| q.borrow_mut().timers.remove(id).is_some())
}

pub fn is_pending(id: TimerId) -> bool {
    TIMERS.with(|q| q.borrow().timers.contains_key(id))
}

pub fn pending_timers() -> usize {
    TIMERS.with(|q| q.borrow().timers.len())
}

pub fn next_deadline() -> Option<Instant> {
    TIMERS.with(|q| q.borrow().timers.values().map(|t| t.deadline).min())
}

/// Fire every timer whose deadline has passed, earliest first.
///
/// Callbacks run with the queue unlocked, so they may schedule or clear
/// timers. A timer scheduled with zero delay from inside a callback fires in
/// the same pass.
pub fn run_due_timers() -> usize {
    let now = clock::now();
    let mut fired = 0;
    loop {
        let due = TIMERS.with(|q| q.borrow_mut().pop_due(now));
        let Some(timer) = due else { break };
        (timer.callback)();
        fired += 1;
    }
    if fired > 0 {
        log::trace!("timer: fired {fired}");
    }
    fired
}
