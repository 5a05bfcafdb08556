use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle returned by [`Signal::subscribe`] and [`Signal::watch`].
    pub struct SubId;
}

type Subscriber<T> = Rc<dyn Fn(&T, &T)>;

pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T> {
    value: T,
    subs: SlotMap<SubId, Subscriber<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    /// Write a new value, then notify subscribers.
    ///
    /// The write is visible to readers before any subscriber runs. Subscribers
    /// are called with no borrow held, so they may read or write this signal.
    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        let old = std::mem::replace(&mut self.0.borrow_mut().value, v);
        self.notify(&old);
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        let old = {
            let mut inner = self.0.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            old
        };
        self.notify(&old);
    }

    /// Called after every write, changed or not.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0
            .borrow_mut()
            .subs
            .insert(Rc::new(move |new: &T, _old: &T| f(new)))
    }

    /// Called with `(new, old)` after a write that changed the value.
    pub fn watch(&self, f: impl Fn(&T, &T) + 'static) -> SubId
    where
        T: PartialEq,
    {
        self.0
            .borrow_mut()
            .subs
            .insert(Rc::new(move |new: &T, old: &T| {
                if new != old {
                    f(new, old);
                }
            }))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.0.borrow_mut().subs.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }

    fn notify(&self, old: &T)
    where
        T: Clone,
    {
        let (new, subs) = {
            let inner = self.0.borrow();
            if inner.subs.is_empty() {
                return;
            }
            let subs: SmallVec<[Subscriber<T>; 4]> = inner.subs.values().cloned().collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&new, old);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&self.0.borrow().value).finish()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
