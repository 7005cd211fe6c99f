//! # Frame Scheduler
//!
//! Virtual-time queue of deferred actions, advanced once per frame by the
//! runtime. Nothing here sleeps or spawns: an action runs on the thread
//! that calls [`Scheduler::tick`], after its delay has elapsed.
//!
//! Clones share one queue.

use crate::domain::{Due, TaskId, TickReport};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

type Action = Box<dyn FnOnce() + Send + 'static>;

struct ScheduledTask {
    due: Due,
    action: Action,
}

#[derive(Default)]
struct SchedulerState {
    now: Duration,
    frame: u64,
    next_id: u64,
    tasks: BTreeMap<TaskId, ScheduledTask>,
}

impl SchedulerState {
    fn push(&mut self, due: Due, action: Action) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.insert(id, ScheduledTask { due, action });
        id
    }
}

/// Shared handle to the deferred-action queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once at least `delay` of virtual time has passed.
    pub fn after<F>(&self, delay: Duration, action: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.state.lock();
        let due = Due::At(state.now + delay);
        state.push(due, Box::new(action))
    }

    /// Run `action` after `frames` ticks. Zero means the next tick.
    pub fn after_frames<F>(&self, frames: u32, action: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.state.lock();
        let due = Due::Frame(state.frame + u64::from(frames.max(1)));
        state.push(due, Box::new(action))
    }

    /// Drop a pending action. Returns `false` if it already ran or was
    /// cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.state.lock().tasks.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.state.lock().tasks.contains_key(&id)
    }

    pub fn pending(&self) -> usize {
        self.state.lock().tasks.len()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Ticks completed since creation.
    pub fn frame(&self) -> u64 {
        self.state.lock().frame
    }

    /// Advance one frame by `delta` and run every action that became due,
    /// in scheduling order.
    ///
    /// Actions may schedule or cancel other actions. A cancelled action
    /// that was due in this tick does not run. Actions scheduled during
    /// the tick wait for a later one. A panicking action is logged and
    /// counted; the rest still run.
    pub fn tick(&self, delta: Duration) -> TickReport {
        let due: Vec<TaskId> = {
            let mut state = self.state.lock();
            state.now += delta;
            state.frame += 1;
            let (now, frame) = (state.now, state.frame);
            state
                .tasks
                .iter()
                .filter(|(_, task)| task.due.is_due(now, frame))
                .map(|(id, _)| *id)
                .collect()
        };

        let mut report = TickReport::default();
        for id in due {
            // Re-check: an earlier action in this batch may have cancelled it.
            let Some(task) = self.state.lock().tasks.remove(&id) else {
                continue;
            };
            match panic::catch_unwind(AssertUnwindSafe(task.action)) {
                Ok(()) => report.ran += 1,
                Err(payload) => {
                    report.faulted += 1;
                    error!(
                        task = %id,
                        panic = %panic_message(payload.as_ref()),
                        "[st-03] Scheduled action panicked"
                    );
                }
            }
        }

        if report.ran + report.faulted > 0 {
            debug!(ran = report.ran, faulted = report.faulted, "[st-03] Tick complete");
        }
        report
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Scheduler")
            .field("now", &state.now)
            .field("frame", &state.frame)
            .field("pending", &state.tasks.len())
            .finish()
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
