//! Thread ownership of a store's open transaction.
//!
//! A store has at most one open transaction. The thread that opened it owns
//! it: nested `begin`s from that thread increase its depth, while every other
//! thread blocks in [`TransactionGate::enter`] until the outermost `commit` or
//! a `rollback` releases it. Calls made while no transaction is open pass
//! straight through.

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

use super::StoreError;
use crate::Result;

/// The open transaction: owner, nesting depth and the store's own state
/// (a snapshot, a database transaction, ...).
struct Open<T> {
    owner: ThreadId,
    depth: usize,
    state: T,
}

pub(crate) struct TransactionGate<T> {
    open: Mutex<Option<Open<T>>>,
    released: Condvar,
}

impl<T> Default for TransactionGate<T> {
    fn default() -> Self {
        Self {
            open: Mutex::new(None),
            released: Condvar::new(),
        }
    }
}

impl<T> fmt::Debug for TransactionGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self
            .open
            .try_lock()
            .ok()
            .and_then(|open| open.as_ref().map(|open| open.depth));
        f.debug_struct("TransactionGate")
            .field("depth", &depth)
            .finish()
    }
}

impl<T> TransactionGate<T> {
    /// Wait until no other thread owns a transaction.
    ///
    /// The returned [`Turn`] keeps every other caller out until it is
    /// dropped, so a store holds it for the whole of one operation.
    pub(crate) fn enter(&self) -> Result<Turn<'_, T>> {
        let me = thread::current().id();
        let guard = self.open.lock().map_err(|_| StoreError::LockPoisoned)?;
        let guard = self
            .released
            .wait_while(guard, |open| open.as_ref().is_some_and(|open| open.owner != me))
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(Turn { gate: self, guard })
    }
}

/// Exclusive access to a store for the current thread.
pub(crate) struct Turn<'a, T> {
    gate: &'a TransactionGate<T>,
    guard: MutexGuard<'a, Option<Open<T>>>,
}

impl<T> Turn<'_, T> {
    /// State of the calling thread's open transaction.
    #[cfg_attr(not(any(feature = "sqlite", feature = "postgres")), allow(dead_code))]
    pub(crate) fn state(&mut self) -> Option<&mut T> {
        self.guard.as_mut().map(|open| &mut open.state)
    }

    /// Nest into the open transaction. Returns `false` if none is open.
    pub(crate) fn nest(&mut self) -> bool {
        match self.guard.as_mut() {
            Some(open) => {
                open.depth += 1;
                true
            }
            None => false,
        }
    }

    /// Start the outermost transaction with `state`.
    pub(crate) fn open(&mut self, state: T) {
        *self.guard = Some(Open {
            owner: thread::current().id(),
            depth: 1,
            state,
        });
    }

    /// Close one nesting level.
    ///
    /// Returns the state once the outermost level closes, releasing the
    /// gate for other threads.
    pub(crate) fn commit(&mut self) -> Result<Option<T>> {
        let Some(open) = self.guard.as_mut() else {
            return Err(StoreError::TransactionFailed {
                reason: "commit without an open transaction".to_string(),
            }
            .into());
        };
        open.depth -= 1;
        if open.depth > 0 {
            return Ok(None);
        }
        Ok(self.release())
    }

    /// Abandon the transaction at any depth, releasing the gate.
    pub(crate) fn rollback(&mut self) -> Option<T> {
        self.release()
    }

    fn release(&mut self) -> Option<T> {
        let open = self.guard.take()?;
        self.gate.released.notify_all();
        Some(open.state)
    }
}
