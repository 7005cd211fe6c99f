//! Objects spawned on behalf of one logic instance.

use parking_lot::Mutex;
use shared_types::VisualId;
use std::sync::Arc;

#[derive(Debug, Default)]
struct LedgerState {
    objects: Vec<VisualId>,
    closed: bool,
}

/// Acquisition-ordered record of spawned objects.
///
/// Shared with pending async continuations so that a load landing after
/// the owner closed can be recognised.
#[derive(Debug, Clone, Default)]
pub struct SpawnLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl SpawnLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an acquisition. Returns `false` once the ledger is closed, in
    /// which case the caller still owns the object.
    pub fn record(&self, id: VisualId) -> bool {
        let mut state = self.state.lock();
        if state.closed {
            return false;
        }
        state.objects.push(id);
        true
    }

    /// Close the ledger and hand back its objects newest first.
    pub fn close(&self) -> Vec<VisualId> {
        let mut state = self.state.lock();
        state.closed = true;
        let mut objects = std::mem::take(&mut state.objects);
        objects.reverse();
        objects
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn objects(&self) -> Vec<VisualId> {
        self.state.lock().objects.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
