use std::cell::RefCell;
use std::rc::Rc;

/// Shared queue of named UI events.
///
/// Controls wired with `onClick`/`onChange` push their event name here when
/// a gesture lands on them; the application drains with [`take_events`] and
/// matches on the names. Clones share the same queue.
///
/// [`take_events`]: EventQueue::take_events
#[derive(Debug, Clone, Default)]
pub struct EventQueue(Rc<RefCell<Vec<String>>>);

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, name: impl Into<String>) {
        self.0.borrow_mut().push(name.into());
    }

    /// Drain all pending events in arrival order.
    pub fn take_events(&self) -> Vec<String> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}
