//! # Event Bus
//!
//! Named multicast registry. Each channel keeps an ordered list of handlers
//! sharing one signature.
//!
//! ## Semantics
//!
//! - `subscribe` appends; subscribing the same handler twice fires it twice.
//! - `unsubscribe` removes the first registration with the same identity.
//! - A channel left without handlers is removed.
//! - `trigger*` calls the handlers registered when the trigger starts, in
//!   subscription order. Handlers may subscribe or unsubscribe re-entrantly;
//!   the change applies to the next trigger.
//! - A panicking handler is logged and skipped; its siblings still run.

use crate::errors::BusError;
use crate::handler::{Handler, Signature};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, warn};

/// Outcome of one trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerReport {
    /// Handlers that ran to completion.
    pub invoked: usize,
    /// Handlers that panicked.
    pub faulted: usize,
}

impl TriggerReport {
    /// True when no handler faulted.
    pub fn is_clean(&self) -> bool {
        self.faulted == 0
    }
}

struct Channel {
    signature: Signature,
    handlers: Vec<Handler>,
}

/// Process-level event registry, shared as `Arc<EventBus>`.
pub struct EventBus {
    channels: Mutex<HashMap<String, Channel>>,

    /// Total triggers issued, including those on unknown channels.
    events_triggered: AtomicU64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            events_triggered: AtomicU64::new(0),
        }
    }

    /// Register `handler` on `name`, creating the channel if needed.
    pub fn subscribe(&self, name: &str, handler: &Handler) -> Result<(), BusError> {
        let mut channels = self.channels.lock();
        let channel = channels.entry(name.to_string()).or_insert_with(|| {
            debug!(channel = %name, signature = %handler.signature(), "Channel created");
            Channel {
                signature: handler.signature(),
                handlers: Vec::new(),
            }
        });

        if channel.signature != handler.signature() {
            let err = BusError::SignatureMismatch {
                channel: name.to_string(),
                expected: channel.signature,
                actual: handler.signature(),
            };
            error!(channel = %name, error = %err, "Subscribe rejected");
            return Err(err);
        }

        channel.handlers.push(handler.clone());
        debug!(
            channel = %name,
            handlers = channel.handlers.len(),
            "Handler subscribed"
        );
        Ok(())
    }

    /// Remove one registration of `handler` from `name`.
    ///
    /// Returns `false` (with a warning) when the channel is unknown, the
    /// signature does not match, or the handler is not registered.
    pub fn unsubscribe(&self, name: &str, handler: &Handler) -> bool {
        let mut channels = self.channels.lock();
        let Some(channel) = channels.get_mut(name) else {
            warn!(channel = %name, "Channel is empty, nothing to unsubscribe");
            return false;
        };

        if channel.signature != handler.signature() {
            warn!(
                channel = %name,
                expected = %channel.signature,
                actual = %handler.signature(),
                "Unsubscribe with mismatched signature ignored"
            );
            return false;
        }

        let Some(index) = channel.handlers.iter().position(|h| h.same_as(handler)) else {
            warn!(channel = %name, "Handler not registered, nothing to unsubscribe");
            return false;
        };

        channel.handlers.remove(index);
        if channel.handlers.is_empty() {
            channels.remove(name);
            debug!(channel = %name, "Channel removed (no handlers left)");
        }
        true
    }

    /// Trigger a nullary channel.
    pub fn trigger(&self, name: &str) -> Result<TriggerReport, BusError> {
        self.dispatch(name, Signature::Nullary, |h| h.invoke0())
    }

    /// Trigger a unary channel.
    pub fn trigger_with<A: 'static>(&self, name: &str, arg: &A) -> Result<TriggerReport, BusError> {
        self.dispatch(name, Signature::unary::<A>(), |h| h.invoke1(arg))
    }

    /// Trigger a binary channel.
    pub fn trigger_with2<A: 'static, B: 'static>(
        &self,
        name: &str,
        first: &A,
        second: &B,
    ) -> Result<TriggerReport, BusError> {
        self.dispatch(name, Signature::binary::<A, B>(), |h| {
            h.invoke2(first, second)
        })
    }

    fn dispatch<F>(
        &self,
        name: &str,
        signature: Signature,
        call: F,
    ) -> Result<TriggerReport, BusError>
    where
        F: Fn(&Handler) -> bool,
    {
        self.events_triggered.fetch_add(1, Ordering::Relaxed);

        // Snapshot so handlers can touch the bus without deadlocking.
        let snapshot = {
            let channels = self.channels.lock();
            let Some(channel) = channels.get(name) else {
                return Ok(TriggerReport::default());
            };
            if channel.signature != signature {
                let err = BusError::SignatureMismatch {
                    channel: name.to_string(),
                    expected: channel.signature,
                    actual: signature,
                };
                error!(channel = %name, error = %err, "Trigger rejected");
                return Err(err);
            }
            channel.handlers.clone()
        };

        let mut report = TriggerReport::default();
        for (index, handler) in snapshot.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| call(handler))) {
                Ok(true) => report.invoked += 1,
                Ok(false) => {
                    report.faulted += 1;
                    error!(channel = %name, index, "Handler callback has unexpected type");
                }
                Err(payload) => {
                    report.faulted += 1;
                    error!(
                        channel = %name,
                        index,
                        panic = %panic_message(payload.as_ref()),
                        "Event handler panicked"
                    );
                }
            }
        }
        Ok(report)
    }

    /// Drop a channel and all of its handlers.
    pub fn clear(&self, name: &str) -> bool {
        self.channels.lock().remove(name).is_some()
    }

    /// Drop every channel.
    pub fn clear_all(&self) {
        let mut channels = self.channels.lock();
        debug!(channels = channels.len(), "Event bus cleared");
        channels.clear();
    }

    /// Number of registrations on `name` (0 for unknown channels).
    pub fn handler_count(&self, name: &str) -> usize {
        self.channels
            .lock()
            .get(name)
            .map_or(0, |c| c.handlers.len())
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.lock().contains_key(name)
    }

    pub fn signature_of(&self, name: &str) -> Option<Signature> {
        self.channels.lock().get(name).map(|c| c.signature)
    }

    /// Names of live channels, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn events_triggered(&self) -> u64 {
        self.events_triggered.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
