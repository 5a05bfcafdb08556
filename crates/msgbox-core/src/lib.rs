//! # Runtime pieces for msgbox
//!
//! A small single-threaded UI runtime. Everything here lives on the UI
//! thread and is reached through thread-locals or `Rc` handles:
//!
//! - `Signal<T>`: observable value with synchronous subscribers.
//! - Composition locals: `provide` / `inject` / `with_local`, keyed by type.
//! - `Scope` and `Dispose`: cleanups tied to the lifetime of a subtree.
//! - `remember_with_key`: values that survive recomposition.
//! - Clock and timer queue: one-shot timers pumped by the host loop.
//!
//! ## Signals
//!
//! ```rust
//! use msgbox_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let open = signal(false);
//! let closes = Rc::new(Cell::new(0));
//! open.watch({
//!     let closes = closes.clone();
//!     move |now, _before| {
//!         if !*now {
//!             closes.set(closes.get() + 1);
//!         }
//!     }
//! });
//!
//! open.set(true);
//! open.set(false);
//! open.set(false); // unchanged: watchers stay quiet
//! assert_eq!(closes.get(), 1);
//! ```
//!
//! ## Timers
//!
//! ```rust
//! use msgbox_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let clock = TestClock::install();
//! let fired = Rc::new(Cell::new(false));
//! set_timeout(Duration::from_millis(200), {
//!     let fired = fired.clone();
//!     move || fired.set(true)
//! });
//!
//! clock.advance(Duration::from_millis(199));
//! run_due_timers();
//! assert!(!fired.get());
//!
//! clock.advance(Duration::from_millis(1));
//! run_due_timers();
//! assert!(fired.get());
//! ```

pub mod clock;
pub mod effects;
pub mod locals;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod timer;

pub use clock::*;
pub use effects::*;
pub use locals::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
pub use timer::*;
