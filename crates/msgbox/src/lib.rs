//! # msgbox
//!
//! One confirmation dialog per tree, driven from anywhere in it.
//!
//! A root creates a [`MessageBox`] and provides it. Any descendant fetches it
//! with [`use_message_box`] and opens the dialog by sending a
//! [`MessageBoxPatch`] with content and an `on_submit` callback. The renderer
//! reads [`MessageBoxState`] and calls `state.submit()` / `state.close()`.
//!
//! ## Lifecycle
//!
//! - Idle: defaults, both actions are no-ops.
//! - Open: a patch with non-empty content sets `visible`.
//! - Loading: `state.submit()` sets `loading` and runs the cached
//!   `on_submit`. The callback reports back with `loading(false)` or
//!   `visible(false)`.
//! - Closing: `visible` went false (through `state.close()` or any direct
//!   write). `on_close` runs once and a reset is scheduled after
//!   `close_delay_ms`. Further close requests are ignored.
//! - The reset returns everything to Idle.
//!
//! The reset is a timer on the UI thread, so the host loop must pump
//! [`msgbox_core::run_due_timers`].
//!
//! ```rust
//! use msgbox::*;
//! use msgbox_core::{TestClock, run_due_timers};
//! use std::time::Duration;
//!
//! let clock = TestClock::install();
//! let mb = create_message_box();
//!
//! let handle = mb.clone();
//! mb.set_message_box(
//!     MessageBoxPatch::new()
//!         .title("提示")
//!         .content("Reset the password to abcd.1234?")
//!         .on_submit(move || {
//!             // ... do the work, then:
//!             handle.set_message_box(MessageBoxPatch::new().visible(false));
//!             handle.set_message_box(MessageBoxPatch::new().loading(false));
//!         }),
//! );
//!
//! mb.state().submit();
//! assert!(!mb.state().visible.get());
//!
//! clock.advance(Duration::from_millis(200));
//! run_due_timers();
//! assert_eq!(mb.state().title.get(), "");
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod patch;
pub mod state;
pub mod tests;
pub mod view;

pub use config::MessageBoxDefaults;
pub use context::*;
pub use controller::MessageBox;
pub use error::MessageBoxError;
pub use patch::{MessageBoxPatch, PatchFields};
pub use state::{Action, Callback, MessageBoxState};
pub use view::{Body, MessageBoxView};
