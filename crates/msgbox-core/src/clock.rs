use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Source of "now" for the timer queue.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

/// Install the clock for this thread. The host installs `SystemClock` (the
/// default when nothing is installed); tests install a `TestClock`.
pub fn set_clock(clock: impl Clock) {
    let clock: Rc<dyn Clock> = Rc::new(clock);
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

pub fn now() -> Instant {
    let clock = CLOCK.with(|c| c.borrow().clone());
    match clock {
        Some(c) => c.now(),
        None => Instant::now(),
    }
}

/// A clock you can drive deterministically. Clones share the same instant.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Create a clock and install it for the current thread.
    pub fn install() -> Self {
        let clock = Self::new();
        set_clock(clock.clone());
        clock
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}
