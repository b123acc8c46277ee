//! Scoped Input Listeners
//!
//! Views subscribe to input events while they are mounted. Every subscription
//! returns a [`ListenerGuard`]; dropping the guard removes the handler, so a
//! view that is torn down (normally, by early return, or by unwinding) never
//! leaves a handler behind, and remounting never doubles them up.
//!
//! ```rust,ignore
//! let registry = ListenerRegistry::new();
//! let guard = registry.subscribe(|event| log::debug!("{event:?}"));
//! registry.dispatch(&InputEvent::Click);
//! drop(guard); // handler gone
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use super::keyboard::KeyCode;

/// Host events delivered to mounted views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Click/tap on the view (requests pointer lock)
    Click,
    /// Escape pressed (releases pointer lock)
    Escape,
    /// The window lost focus
    FocusLost,
}

type Handler = Box<dyn FnMut(&InputEvent)>;

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
    /// Set while `dispatch` has the handler list checked out
    dispatching: bool,
    /// Handlers released while checked out
    released_during_dispatch: HashSet<u64>,
}

/// Owner of the live handler list. Cloning shares the same list.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("handlers", &self.len())
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It stays registered until the guard is dropped.
    #[must_use = "dropping the guard unsubscribes the handler immediately"]
    pub fn subscribe<F>(&self, handler: F) -> ListenerGuard
    where
        F: FnMut(&InputEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, Box::new(handler)));
        log::trace!("listener {id} subscribed");
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every live handler, in subscription order.
    ///
    /// Handlers may subscribe or drop guards while being called; those changes
    /// take effect from the next dispatch. A panicking handler unwinds through
    /// here with the registry left usable.
    pub fn dispatch(&self, event: &InputEvent) {
        let handlers = {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                log::warn!("nested dispatch of {event:?} ignored");
                return;
            }
            inner.dispatching = true;
            std::mem::take(&mut inner.handlers)
        };

        let mut checked_out = CheckedOut {
            inner: &self.inner,
            handlers,
        };
        for (_, handler) in checked_out.handlers.iter_mut() {
            handler(event);
        }
    }

    /// Non-owning handle, for handlers that need to subscribe more handlers
    /// without keeping the registry alive.
    pub fn downgrade(&self) -> WeakListenerRegistry {
        WeakListenerRegistry {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live handlers. Not meaningful from inside a handler.
    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// See [`ListenerRegistry::downgrade`].
#[derive(Clone)]
pub struct WeakListenerRegistry {
    inner: Weak<RefCell<RegistryInner>>,
}

impl WeakListenerRegistry {
    pub fn upgrade(&self) -> Option<ListenerRegistry> {
        self.inner.upgrade().map(|inner| ListenerRegistry { inner })
    }
}

impl RegistryInner {
    /// Detach a handler. The caller drops it once the borrow is released,
    /// since the handler may own guards of its own.
    fn remove(&mut self, id: u64) -> Option<(u64, Handler)> {
        if let Some(index) = self.handlers.iter().position(|(h, _)| *h == id) {
            Some(self.handlers.remove(index))
        } else {
            if self.dispatching {
                self.released_during_dispatch.insert(id);
            }
            None
        }
    }
}

/// Handler list taken out of the registry for one dispatch.
/// Puts it back on drop, including when a handler panics.
struct CheckedOut<'a> {
    inner: &'a RefCell<RegistryInner>,
    handlers: Vec<(u64, Handler)>,
}

impl Drop for CheckedOut<'_> {
    fn drop(&mut self) {
        let released_handlers: Vec<(u64, Handler)> = {
            let mut inner = self.inner.borrow_mut();
            let released = std::mem::take(&mut inner.released_during_dispatch);
            let (gone, mut kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.handlers)
                .into_iter()
                .partition(|(id, _)| released.contains(id));
            // Anything subscribed mid-dispatch lands after the existing handlers
            kept.append(&mut inner.handlers);
            inner.handlers = kept;
            inner.dispatching = false;
            gone
        };
        drop(released_handlers);
    }
}

/// Keeps one handler registered. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<RegistryInner>>,
}

impl ListenerGuard {
    /// Unsubscribe now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Registry may already be gone on teardown
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.borrow_mut().remove(self.id);
            drop(removed);
            log::trace!("listener {} released", self.id);
        }
    }
}
