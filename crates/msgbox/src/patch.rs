use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::state::Callback;

bitflags! {
    /// Which parts of the dialog a patch touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct PatchFields: u16 {
        const VISIBLE = 1 << 0;
        const LOADING = 1 << 1;
        const TITLE = 1 << 2;
        const CONTENT = 1 << 3;
        const IS_HTML = 1 << 4;
        const WIDTH = 1 << 5;
        const TOP = 1 << 6;
        const CONFIRM_TEXT = 1 << 7;
        const CANCEL_TEXT = 1 << 8;
        const ON_SUBMIT = 1 << 9;
        const ON_CLOSE = 1 << 10;

        const CALLBACKS = Self::ON_SUBMIT.bits() | Self::ON_CLOSE.bits();
    }
}

/// A partial update for [`MessageBox::set_message_box`](crate::MessageBox::set_message_box).
///
/// Fields left unset are not touched. Supplying non-empty content opens the
/// dialog.
///
/// ```rust
/// use msgbox::{MessageBoxPatch, PatchFields};
///
/// let patch = MessageBoxPatch::new()
///     .title("提示")
///     .content("Reset this user's password?")
///     .on_submit(|| {});
/// assert!(patch.opens());
/// assert!(patch.fields().contains(PatchFields::TITLE | PatchFields::ON_SUBMIT));
///
/// let patch = MessageBoxPatch::new().loading(false);
/// assert_eq!(patch.fields(), PatchFields::LOADING);
/// ```
#[derive(Clone, Default)]
pub struct MessageBoxPatch {
    pub visible: Option<bool>,
    pub loading: Option<bool>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_html: Option<bool>,
    pub width: Option<f32>,
    pub top: Option<String>,
    pub confirm_button_text: Option<String>,
    pub cancel_button_text: Option<String>,
    pub on_submit: Option<Callback>,
    pub on_close: Option<Callback>,
}

impl MessageBoxPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(mut self, v: bool) -> Self {
        self.visible = Some(v);
        self
    }

    pub fn loading(mut self, v: bool) -> Self {
        self.loading = Some(v);
        self
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.title = Some(v.into());
        self
    }

    pub fn content(mut self, v: impl Into<String>) -> Self {
        self.content = Some(v.into());
        self
    }

    /// Content given as markup.
    pub fn html(mut self, v: impl Into<String>) -> Self {
        self.content = Some(v.into());
        self.is_html = Some(true);
        self
    }

    pub fn is_html(mut self, v: bool) -> Self {
        self.is_html = Some(v);
        self
    }

    pub fn width(mut self, v: f32) -> Self {
        self.width = Some(v);
        self
    }

    pub fn top(mut self, v: impl Into<String>) -> Self {
        self.top = Some(v.into());
        self
    }

    pub fn confirm_button_text(mut self, v: impl Into<String>) -> Self {
        self.confirm_button_text = Some(v.into());
        self
    }

    pub fn cancel_button_text(mut self, v: impl Into<String>) -> Self {
        self.cancel_button_text = Some(v.into());
        self
    }

    /// Run when the user confirms. Report completion with another patch:
    /// `loading(false)` to stay open or `visible(false)` to close.
    pub fn on_submit(mut self, f: impl Fn() + 'static) -> Self {
        self.on_submit = Some(Rc::new(f));
        self
    }

    /// Run once when the dialog starts closing.
    pub fn on_close(mut self, f: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(f));
        self
    }

    /// Carries non-empty content, which is the open signal.
    pub fn opens(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn fields(&self) -> PatchFields {
        let mut f = PatchFields::empty();
        f.set(PatchFields::VISIBLE, self.visible.is_some());
        f.set(PatchFields::LOADING, self.loading.is_some());
        f.set(PatchFields::TITLE, self.title.is_some());
        f.set(PatchFields::CONTENT, self.content.is_some());
        f.set(PatchFields::IS_HTML, self.is_html.is_some());
        f.set(PatchFields::WIDTH, self.width.is_some());
        f.set(PatchFields::TOP, self.top.is_some());
        f.set(PatchFields::CONFIRM_TEXT, self.confirm_button_text.is_some());
        f.set(PatchFields::CANCEL_TEXT, self.cancel_button_text.is_some());
        f.set(PatchFields::ON_SUBMIT, self.on_submit.is_some());
        f.set(PatchFields::ON_CLOSE, self.on_close.is_some());
        f
    }
}

impl fmt::Debug for MessageBoxPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageBoxPatch").field(&self.fields()).finish()
    }
}
