//! Generation-stamped cache cell shared by the stores.
//!
//! Every admitted fetch receives a [`Ticket`] carrying the generation it
//! started in. Admitting another fetch or invalidating the cell moves the
//! generation forward, so a response that resolves afterwards no longer
//! matches and is dropped instead of being written.
use std::{
    ops::ControlFlow,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::Serialize;

use crate::stores::Fetch;

/// Snapshot of a store cache as seen by the view.
///
/// `data == None` means "never fetched since the last invalidation", which
/// is distinct from a successful fetch that returned nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cache<T> {
    pub data: Option<T>,
    pub loading: bool,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
        }
    }
}

/// Handle of an admitted fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

#[derive(Debug)]
struct Slot<T, K> {
    data: Option<T>,
    /// Key of the outstanding fetch. `Some` while loading.
    pending: Option<K>,
    generation: u64,
}

#[derive(Debug)]
pub(crate) struct CacheCell<T, K = ()> {
    slot: Mutex<Slot<T, K>>,
}

impl<T, K> Default for CacheCell<T, K> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot {
                data: None,
                pending: None,
                generation: 0,
            }),
        }
    }
}

impl<T, K> CacheCell<T, K> {
    fn lock(&self) -> MutexGuard<'_, Slot<T, K>> {
        // Critical sections never panic halfway through a write.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn snapshot(&self) -> Cache<T>
    where
        T: Clone,
    {
        let slot = self.lock();
        Cache {
            data: slot.data.clone(),
            loading: slot.pending.is_some(),
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.lock().pending.is_some()
    }

    pub(crate) fn has_data(&self) -> bool {
        self.lock().data.is_some()
    }

    /// Runs `f` against the cached data without cloning it.
    pub(crate) fn read<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.lock().data.as_ref())
    }

    /// Admits a fetch for `key`.
    ///
    /// `admit` sees the cached data and the key of the outstanding fetch,
    /// and either continues with a value for the caller or breaks with the
    /// outcome to report without issuing a request. Admission supersedes
    /// any outstanding fetch.
    pub(crate) fn begin<R>(
        &self,
        key: K,
        admit: impl FnOnce(Option<&T>, Option<&K>) -> ControlFlow<Fetch, R>,
    ) -> ControlFlow<Fetch, (Ticket, R)> {
        let mut slot = self.lock();
        let value = match admit(slot.data.as_ref(), slot.pending.as_ref()) {
            ControlFlow::Continue(value) => value,
            ControlFlow::Break(outcome) => return ControlFlow::Break(outcome),
        };
        slot.generation += 1;
        slot.pending = Some(key);
        ControlFlow::Continue((Ticket(slot.generation), value))
    }

    /// Writes the result of an admitted fetch if its ticket is still current.
    pub(crate) fn commit(&self, ticket: Ticket, apply: impl FnOnce(&mut Option<T>)) -> Fetch {
        let mut slot = self.lock();
        if slot.generation != ticket.0 {
            return Fetch::Stale;
        }
        apply(&mut slot.data);
        slot.pending = None;
        Fetch::Applied
    }

    /// Ends a failed fetch, leaving the data untouched.
    ///
    /// Returns `false` when the ticket is no longer current.
    pub(crate) fn release(&self, ticket: Ticket) -> bool {
        let mut slot = self.lock();
        if slot.generation != ticket.0 {
            return false;
        }
        slot.pending = None;
        true
    }

    /// Ends a failed fetch and drops the cached data with it.
    ///
    /// Returns `false` when the ticket is no longer current.
    pub(crate) fn fail(&self, ticket: Ticket) -> bool {
        let mut slot = self.lock();
        if slot.generation != ticket.0 {
            return false;
        }
        slot.data = None;
        slot.pending = None;
        true
    }

    /// Drops the cached data and orphans any outstanding fetch.
    pub(crate) fn invalidate(&self) {
        let mut slot = self.lock();
        slot.data = None;
        slot.pending = None;
        slot.generation += 1;
    }
}
