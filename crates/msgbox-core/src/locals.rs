//! # Composition locals
//!
//! Values provided by an ancestor and looked up by descendants, keyed by
//! type. A frame is pushed for each provided subtree; lookups walk frames
//! from innermost to outermost.
//!
//! ```rust
//! use msgbox_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Accent(&'static str);
//!
//! assert_eq!(inject::<Accent>(), None);
//! with_local(Accent("teal"), || {
//!     assert_eq!(inject::<Accent>(), Some(Accent("teal")));
//!     with_local(Accent("red"), || {
//!         assert_eq!(inject::<Accent>(), Some(Accent("red")));
//!     });
//!     assert_eq!(inject::<Accent>(), Some(Accent("teal")));
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = const { RefCell::new(Vec::new()) };
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        let mut st = st.borrow_mut();
        if let Some(top) = st.last_mut() {
            top.insert(t, v);
        } else {
            // no frame: this becomes the root frame
            let mut m = HashMap::new();
            m.insert(t, v);
            st.push(m);
        }
    });
}

/// Provide `value` to everything composed inside `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Provide `value` in the innermost frame, replacing any `T` already there.
pub fn provide<T: Clone + 'static>(value: T) {
    set_local_boxed(TypeId::of::<T>(), Box::new(value));
}

/// Nearest provided `T`, if any.
pub fn inject<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}
