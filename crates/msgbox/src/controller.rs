use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use msgbox_core::{Dispose, SubId, TimerId, clear_timeout, effect, on_unmount, set_timeout};

use crate::MessageBoxDefaults;
use crate::patch::{MessageBoxPatch, PatchFields};
use crate::state::{Action, Callback, MessageBoxState};

/// Controller for the one dialog of a tree.
///
/// Cheap to clone; every clone drives the same [`MessageBoxState`].
///
/// ```rust
/// use msgbox::{MessageBox, MessageBoxPatch};
///
/// let mb = MessageBox::new();
/// mb.set_message_box(
///     MessageBoxPatch::new()
///         .title("Confirm")
///         .content("Proceed?")
///         .on_submit(|| {}),
/// );
/// assert!(mb.state().visible.get());
///
/// mb.state().submit();
/// assert!(mb.state().loading.get());
/// ```
#[derive(Clone)]
pub struct MessageBox {
    inner: Rc<Inner>,
}

struct Inner {
    state: MessageBoxState,
    defaults: MessageBoxDefaults,
    /// The latest `on_submit`; later patches overwrite it.
    submit_cache: RefCell<Option<Callback>>,
    /// Pending reset. While set, close requests are ignored.
    close_timer: Cell<Option<TimerId>>,
    visibility_watch: Cell<Option<SubId>>,
    teardown: RefCell<Option<Dispose>>,
}

impl MessageBox {
    pub fn new() -> Self {
        Self::with_defaults(MessageBoxDefaults::default())
    }

    /// Build the controller. When a `Scope` is current, disposing it cancels
    /// any pending reset and detaches the controller from its state.
    pub fn with_defaults(defaults: MessageBoxDefaults) -> Self {
        let inner = Rc::new(Inner {
            state: MessageBoxState::new(&defaults),
            defaults,
            submit_cache: RefCell::new(None),
            close_timer: Cell::new(None),
            visibility_watch: Cell::new(None),
            teardown: RefCell::new(None),
        });

        // Whoever hides the dialog, the close path still runs.
        let weak = Rc::downgrade(&inner);
        let watch = inner.state.visible.watch(move |visible, _| {
            if !*visible
                && let Some(inner) = weak.upgrade()
            {
                inner.on_hidden();
            }
        });
        inner.visibility_watch.set(Some(watch));

        let weak = Rc::downgrade(&inner);
        let teardown = effect(move || {
            on_unmount(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.detach();
                }
            })
        });
        *inner.teardown.borrow_mut() = Some(teardown);

        Self { inner }
    }

    pub fn state(&self) -> &MessageBoxState {
        &self.inner.state
    }

    pub fn defaults(&self) -> &MessageBoxDefaults {
        &self.inner.defaults
    }

    /// Merge `patch` into the state and, when it carries callbacks, re-arm
    /// the confirm and close actions.
    ///
    /// `visible` is written last, after the other fields and the new
    /// actions, so a patch that hides the dialog closes it with its own
    /// `on_close`. Non-empty `content` always wins and opens the dialog.
    ///
    /// Opening while a close is still pending runs that reset first: fields
    /// the earlier dialog set and this patch does not carry go back to the
    /// defaults, and the earlier callbacks are dropped.
    pub fn set_message_box(&self, patch: MessageBoxPatch) {
        let inner = &self.inner;
        let fields = patch.fields();
        log::trace!("message box: patch {fields:?}");

        let opens = patch.opens();
        if opens {
            inner.finish_pending_close();
        }

        inner.state.merge(&patch);
        let visible = if opens { Some(true) } else { patch.visible };

        if fields.intersects(PatchFields::CALLBACKS) {
            let MessageBoxPatch {
                on_submit,
                on_close,
                ..
            } = patch;
            if let Some(submit) = on_submit {
                *inner.submit_cache.borrow_mut() = Some(submit);
            }
            inner.arm(on_close);
        }

        // Going false runs the close path through the watcher.
        if let Some(visible) = visible {
            inner.state.visible.set(visible);
            if opens {
                log::debug!("message box: open");
            }
        }
    }

    /// Restore every field and both actions to the defaults now, dropping
    /// the cached submit callback and any pending reset.
    pub fn reset(&self) {
        let inner = &self.inner;
        if let Some(id) = inner.close_timer.take() {
            clear_timeout(id);
        }
        inner.submit_cache.borrow_mut().take();
        inner.restore();
    }

    /// Closing, with the reset still pending.
    pub fn is_closing(&self) -> bool {
        self.inner.close_timer.get().is_some()
    }

    /// Stop reacting to the state and cancel any pending reset. Runs
    /// automatically when the owning scope is disposed.
    pub fn dispose(&self) {
        let teardown = self.inner.teardown.borrow_mut().take();
        match teardown {
            Some(d) => d.run(),
            None => self.inner.detach(),
        }
    }
}

impl Default for MessageBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn arm(self: &Rc<Self>, on_close: Option<Callback>) {
        let weak = Rc::downgrade(self);
        let submit = Action::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.run_submit();
            }
        });

        let weak = Rc::downgrade(self);
        let close = Action::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.guarded_close(on_close.as_ref());
            }
        });

        self.state.set_actions(submit, close);
    }

    fn run_submit(&self) {
        self.state.loading.set(true);
        let cached = self.submit_cache.borrow().clone();
        if let Some(submit) = cached {
            submit();
        }
    }

    fn guarded_close(self: &Rc<Self>, on_close: Option<&Callback>) {
        if self.close_timer.get().is_some() {
            log::trace!("message box: already closing, close ignored");
            return;
        }

        // Armed before `visible` is written: the watcher re-enters here.
        let weak: Weak<Inner> = Rc::downgrade(self);
        let id = set_timeout(self.defaults.close_delay(), move || {
            if let Some(inner) = weak.upgrade() {
                inner.close_timer.set(None);
                inner.restore();
            }
        });
        self.close_timer.set(Some(id));
        log::debug!("message box: closing");

        self.state.visible.set(false);
        if let Some(on_close) = on_close {
            on_close();
        }
    }

    fn on_hidden(&self) {
        self.submit_cache.borrow_mut().take();
        self.state.close();
    }

    /// A new dialog is opening over a closing one: reset now instead of
    /// letting the timer wipe the new content.
    fn finish_pending_close(&self) {
        if let Some(id) = self.close_timer.take() {
            clear_timeout(id);
            log::debug!("message box: reopened while closing");
            self.restore();
        }
    }

    fn restore(&self) {
        self.state.restore(&self.defaults);
        log::debug!("message box: reset");
    }

    fn detach(&self) {
        if let Some(id) = self.close_timer.take() {
            clear_timeout(id);
        }
        if let Some(watch) = self.visibility_watch.take() {
            self.state.visible.unsubscribe(watch);
        }
        self.submit_cache.borrow_mut().take();
        self.state.set_actions(Action::noop(), Action::noop());
    }
}
