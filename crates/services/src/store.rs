//! Reducer-backed state containers.
//!
//! Each store owns one state value behind a lock. Commands are applied to
//! completion while the lock is held, so readers only ever observe the state
//! between two commands.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A state value that changes only through typed commands.
pub trait Reducer: Clone + Send + 'static {
    type Command: fmt::Debug + Send;

    /// Store name used in log fields.
    const NAME: &'static str;

    fn reduce(&mut self, command: Self::Command);
}

/// Shared handle to a reducer state. Clones point at the same state.
pub struct Store<S> {
    state: Arc<Mutex<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Reducer> Store<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn dispatch(&self, command: S::Command) {
        tracing::debug!(store = S::NAME, ?command, "dispatch");
        self.lock().reduce(command);
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.lock().clone()
    }

    /// Reads a projection without cloning the whole state.
    pub fn select<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.lock())
    }

    /// Runs several reductions atomically. Used where a check and a write
    /// must not be split by another command.
    pub(crate) fn transact<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // A panic inside a reducer leaves the previous state usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome of an asynchronous command as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}
