//! Sharing one controller with a whole tree.
//!
//! The root creates the controller and provides it; descendants look it up
//! with [`use_message_box`]. The lookup key is the `MessageBox` type itself.
//!
//! ```rust
//! use msgbox::*;
//!
//! let root = create_message_box();
//!
//! // somewhere deep in the tree
//! let mb = use_message_box().unwrap();
//! mb.set_message_box(MessageBoxPatch::new().content("Delete?").on_submit(|| {}));
//! assert!(root.state().visible.get());
//! ```

use msgbox_core::{inject, provide, remember_with_key, untracked, with_local};

use crate::{MessageBox, MessageBoxDefaults, MessageBoxError};

const REMEMBER_KEY: &str = "msgbox:controller";

/// Create a controller and provide it to the current frame.
pub fn create_message_box() -> MessageBox {
    create_message_box_with(MessageBoxDefaults::default())
}

pub fn create_message_box_with(defaults: MessageBoxDefaults) -> MessageBox {
    let mb = MessageBox::with_defaults(defaults);
    provide(mb.clone());
    mb
}

/// Make `mb` the controller seen by everything composed inside `f`.
pub fn provide_message_box<R>(mb: MessageBox, f: impl FnOnce() -> R) -> R {
    with_local(mb, f)
}

/// The nearest provided controller.
pub fn use_message_box() -> Result<MessageBox, MessageBoxError> {
    try_use_message_box().ok_or(MessageBoxError::NotProvided)
}

pub fn try_use_message_box() -> Option<MessageBox> {
    inject::<MessageBox>()
}

/// Composition-stable controller: the same instance on every pass, provided
/// to the current frame each time. It is not tied to the pass's scope.
pub fn remember_message_box() -> MessageBox {
    let mb = remember_with_key(REMEMBER_KEY, || untracked(MessageBox::new));
    let mb = (*mb).clone();
    provide(mb.clone());
    mb
}
