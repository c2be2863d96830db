use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct GateState {
    registered: usize,
    completed: usize,
    sealed: bool,
    callback: Option<Box<dyn FnOnce()>>,
}

/// Join barrier over the transitions of one redraw invocation.
///
/// Every timed draw registers a handle; the callback installed with
/// `on_settled` fires exactly once, when each registered handle has
/// reported completion. The counter is scoped to this gate, so a new
/// redraw invocation never interferes with a prior one's bookkeeping.
#[derive(Clone, Default)]
pub struct TransitionGate {
    state: Rc<RefCell<GateState>>,
}

impl TransitionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one pending transition.
    #[must_use]
    pub fn register(&self) -> TransitionHandle {
        self.state.borrow_mut().registered += 1;
        TransitionHandle {
            state: Rc::clone(&self.state),
        }
    }

    /// Installs the completion callback and seals the registration set.
    /// Fires immediately when nothing is pending.
    pub fn on_settled(&self, callback: impl FnOnce() + 'static) {
        let ready = {
            let mut state = self.state.borrow_mut();
            state.sealed = true;
            state.completed == state.registered
        };
        if ready {
            callback();
        } else {
            self.state.borrow_mut().callback = Some(Box::new(callback));
        }
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        let state = self.state.borrow();
        state.registered - state.completed
    }
}

impl fmt::Debug for TransitionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TransitionGate")
            .field("registered", &state.registered)
            .field("completed", &state.completed)
            .field("sealed", &state.sealed)
            .finish()
    }
}

/// Completion token for one registered transition.
#[derive(Debug)]
pub struct TransitionHandle {
    state: Rc<RefCell<GateState>>,
}

impl fmt::Debug for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateState")
            .field("registered", &self.registered)
            .field("completed", &self.completed)
            .field("sealed", &self.sealed)
            .finish()
    }
}

impl TransitionHandle {
    /// Marks this transition as finished. Consumes the handle, so a
    /// transition can never report completion twice.
    pub fn complete(self) {
        let callback = {
            let mut state = self.state.borrow_mut();
            state.completed += 1;
            if state.sealed && state.completed == state.registered {
                state.callback.take()
            } else {
                None
            }
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TransitionGate;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn callback_waits_for_every_registered_transition() {
        let gate = TransitionGate::new();
        let first = gate.register();
        let second = gate.register();

        let fired = Rc::new(Cell::new(0));
        let observer = Rc::clone(&fired);
        gate.on_settled(move || observer.set(observer.get() + 1));

        assert_eq!(fired.get(), 0);
        first.complete();
        assert_eq!(fired.get(), 0);
        second.complete();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn callback_fires_synchronously_when_nothing_pending() {
        let gate = TransitionGate::new();
        let fired = Rc::new(Cell::new(false));
        let observer = Rc::clone(&fired);
        gate.on_settled(move || observer.set(true));
        assert!(fired.get());
    }

    #[test]
    fn completions_before_sealing_count_toward_the_join() {
        let gate = TransitionGate::new();
        let handle = gate.register();
        handle.complete();

        let fired = Rc::new(Cell::new(false));
        let observer = Rc::clone(&fired);
        gate.on_settled(move || observer.set(true));
        assert!(fired.get());
    }

    #[test]
    fn gates_are_invocation_scoped() {
        let stale = TransitionGate::new();
        let stale_handle = stale.register();

        let fresh = TransitionGate::new();
        let fired = Rc::new(Cell::new(false));
        let observer = Rc::clone(&fired);
        fresh.on_settled(move || observer.set(true));

        // the fresh gate settles without waiting on the stale invocation
        assert!(fired.get());
        assert_eq!(stale.pending(), 1);
        stale_handle.complete();
        assert_eq!(stale.pending(), 0);
    }
}
