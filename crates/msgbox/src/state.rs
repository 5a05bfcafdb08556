use std::fmt;
use std::rc::Rc;

use msgbox_core::{Signal, signal};

use crate::MessageBoxDefaults;
use crate::patch::MessageBoxPatch;

/// Zero-argument callback supplied by callers (`on_submit`, `on_close`).
pub type Callback = Rc<dyn Fn()>;

/// What the confirm or cancel control does when invoked: nothing, or a
/// closure owned by the controller.
#[derive(Clone, Default)]
pub struct Action(Option<Callback>);

impl Action {
    pub fn noop() -> Self {
        Self(None)
    }

    pub(crate) fn new(f: impl Fn() + 'static) -> Self {
        Self(Some(Rc::new(f)))
    }

    pub fn invoke(&self) {
        if let Some(f) = &self.0 {
            f()
        }
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    /// Same closure (or both no-ops).
    pub fn ptr_eq(&self, other: &Action) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_noop() { "Action(noop)" } else { "Action(..)" })
    }
}

/// The dialog's shared reactive record.
///
/// Cloning yields another handle to the same record. Renderers read the
/// fields and call [`submit`](Self::submit) / [`close`](Self::close); only
/// the controller swaps the actions behind those two calls.
#[derive(Clone, Debug)]
pub struct MessageBoxState {
    pub visible: Signal<bool>,
    /// A confirm is in flight; the confirm control should be disabled.
    pub loading: Signal<bool>,
    pub title: Signal<String>,
    pub content: Signal<String>,
    /// Render `content` as markup instead of plain text.
    pub is_html: Signal<bool>,
    pub width: Signal<f32>,
    pub top: Signal<String>,
    pub confirm_button_text: Signal<String>,
    pub cancel_button_text: Signal<String>,
    submit: Signal<Action>,
    close: Signal<Action>,
}

impl MessageBoxState {
    pub(crate) fn new(defaults: &MessageBoxDefaults) -> Self {
        Self {
            visible: signal(false),
            loading: signal(false),
            title: signal(String::new()),
            content: signal(String::new()),
            is_html: signal(false),
            width: signal(defaults.width),
            top: signal(defaults.top.clone()),
            confirm_button_text: signal(defaults.confirm_button_text.clone()),
            cancel_button_text: signal(defaults.cancel_button_text.clone()),
            submit: signal(Action::noop()),
            close: signal(Action::noop()),
        }
    }

    /// Confirm: run whatever the controller armed.
    pub fn submit(&self) {
        self.submit.get().invoke()
    }

    /// Cancel or dismiss.
    pub fn close(&self) {
        self.close.get().invoke()
    }

    pub fn submit_action(&self) -> Action {
        self.submit.get()
    }

    pub fn close_action(&self) -> Action {
        self.close.get()
    }

    pub(crate) fn set_actions(&self, submit: Action, close: Action) {
        self.submit.set(submit);
        self.close.set(close);
    }

    /// Shallow merge: each field carried by `patch` overwrites the stored one.
    /// `visible` is left alone; the controller writes it once the rest of the
    /// patch has landed.
    pub(crate) fn merge(&self, patch: &MessageBoxPatch) {
        if let Some(v) = patch.loading {
            self.loading.set(v);
        }
        if let Some(v) = &patch.title {
            self.title.set(v.clone());
        }
        if let Some(v) = &patch.content {
            self.content.set(v.clone());
        }
        if let Some(v) = patch.is_html {
            self.is_html.set(v);
        }
        if let Some(v) = patch.width {
            self.width.set(v);
        }
        if let Some(v) = &patch.top {
            self.top.set(v.clone());
        }
        if let Some(v) = &patch.confirm_button_text {
            self.confirm_button_text.set(v.clone());
        }
        if let Some(v) = &patch.cancel_button_text {
            self.cancel_button_text.set(v.clone());
        }
    }

    /// Back to `defaults`. Actions are disarmed first so anything reacting
    /// to `visible` going false sees no-op actions.
    pub(crate) fn restore(&self, defaults: &MessageBoxDefaults) {
        self.set_actions(Action::noop(), Action::noop());
        self.visible.set(false);
        self.loading.set(false);
        self.title.set(String::new());
        self.content.set(String::new());
        self.is_html.set(false);
        self.width.set(defaults.width);
        self.top.set(defaults.top.clone());
        self.confirm_button_text
            .set(defaults.confirm_button_text.clone());
        self.cancel_button_text
            .set(defaults.cancel_button_text.clone());
    }
}
