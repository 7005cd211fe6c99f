//! # Lifecycle Host
//!
//! Records every subscription and deferred action made on behalf of one
//! owner, and releases all of them on [`LifecycleHost::teardown`] or drop.

use crate::domain::{LifecycleError, TaskId, TeardownReport};
use crate::scheduler::Scheduler;
use shared_bus::{BusError, EventBus, Handler, TriggerReport};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-owner subscription and task bookkeeping.
pub struct LifecycleHost {
    owner: String,
    bus: Arc<EventBus>,
    scheduler: Scheduler,
    subscriptions: Vec<(String, Handler)>,
    tasks: Vec<TaskId>,
    torn_down: bool,
}

impl LifecycleHost {
    pub fn new(owner: impl Into<String>, bus: Arc<EventBus>, scheduler: Scheduler) -> Self {
        Self {
            owner: owner.into(),
            bus,
            scheduler,
            subscriptions: Vec::new(),
            tasks: Vec::new(),
            torn_down: false,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Subscribe on the bus and remember the registration for teardown.
    pub fn subscribe(&mut self, name: &str, handler: &Handler) -> Result<(), LifecycleError> {
        self.ensure_live()?;
        self.bus.subscribe(name, handler)?;
        self.subscriptions.push((name.to_string(), handler.clone()));
        Ok(())
    }

    /// Unsubscribe early. Forgets the first matching record, if any.
    pub fn unsubscribe(&mut self, name: &str, handler: &Handler) -> bool {
        if let Some(pos) = self
            .subscriptions
            .iter()
            .position(|(n, h)| n == name && h.same_as(handler))
        {
            self.subscriptions.remove(pos);
        }
        self.bus.unsubscribe(name, handler)
    }

    pub fn trigger(&self, name: &str) -> Result<TriggerReport, BusError> {
        self.bus.trigger(name)
    }

    pub fn trigger_with<A: 'static>(&self, name: &str, arg: &A) -> Result<TriggerReport, BusError> {
        self.bus.trigger_with(name, arg)
    }

    pub fn trigger_with2<A: 'static, B: 'static>(
        &self,
        name: &str,
        a: &A,
        b: &B,
    ) -> Result<TriggerReport, BusError> {
        self.bus.trigger_with2(name, a, b)
    }

    /// Run `action` after `delay` of virtual time unless torn down first.
    pub fn delay<F>(&mut self, delay: Duration, action: F) -> Result<TaskId, LifecycleError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.ensure_live()?;
        self.prune_finished();
        let id = self.scheduler.after(delay, action);
        self.tasks.push(id);
        Ok(id)
    }

    /// Run `action` after `frames` ticks unless torn down first. Zero
    /// frames means the next tick.
    pub fn delay_frames<F>(&mut self, frames: u32, action: F) -> Result<TaskId, LifecycleError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.ensure_live()?;
        self.prune_finished();
        let id = self.scheduler.after_frames(frames, action);
        self.tasks.push(id);
        Ok(id)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.retain(|t| *t != id);
        self.scheduler.cancel(id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Deferred actions still waiting to run.
    pub fn pending_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|id| self.scheduler.is_pending(**id))
            .count()
    }

    /// Release every recorded subscription and cancel every pending
    /// action. Idempotent; later calls return an empty report.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        if self.torn_down {
            return report;
        }
        self.torn_down = true;

        for (name, handler) in self.subscriptions.drain(..) {
            if self.bus.unsubscribe(&name, &handler) {
                report.unsubscribed += 1;
            } else {
                report.missing += 1;
            }
        }
        for id in self.tasks.drain(..) {
            if self.scheduler.cancel(id) {
                report.cancelled += 1;
            }
        }

        if report.missing > 0 {
            warn!(
                owner = %self.owner,
                missing = report.missing,
                "[st-03] Some subscriptions were already gone at teardown"
            );
        }
        info!(
            owner = %self.owner,
            unsubscribed = report.unsubscribed,
            cancelled = report.cancelled,
            "[st-03] Lifecycle host torn down"
        );
        report
    }

    fn ensure_live(&self) -> Result<(), LifecycleError> {
        if self.torn_down {
            return Err(LifecycleError::TornDown {
                owner: self.owner.clone(),
            });
        }
        Ok(())
    }

    fn prune_finished(&mut self) {
        let scheduler = &self.scheduler;
        self.tasks.retain(|id| scheduler.is_pending(*id));
    }
}

impl Drop for LifecycleHost {
    fn drop(&mut self) {
        if !self.torn_down {
            debug!(owner = %self.owner, "[st-03] Host dropped without teardown");
            self.teardown();
        }
    }
}

impl std::fmt::Debug for LifecycleHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHost")
            .field("owner", &self.owner)
            .field("subscriptions", &self.subscriptions.len())
            .field("tasks", &self.tasks.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
