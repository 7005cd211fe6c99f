//! # Lifecycle Subsystem (st-03)
//!
//! Ties event subscriptions and deferred actions to the lifetime of an
//! owner, so nothing outlives the panel or logic that registered it.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   subscribe / unsubscribe   ┌──────────┐
//! │ LifecycleHost │ ──────────────────────────▶ │ EventBus │
//! │   (owner)     │                             └──────────┘
//! │               │   after / after_frames      ┌───────────┐
//! │               │ ──────────────────────────▶ │ Scheduler │ ◀── tick(delta)
//! └───────────────┘          cancel             └───────────┘
//! ```
//!
//! Teardown is total and idempotent: every recorded subscription is
//! removed, every pending action is cancelled. Dropping a host tears it
//! down.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod host;
pub mod scheduler;

pub use domain::{Due, LifecycleError, TaskId, TeardownReport, TickReport};
pub use host::LifecycleHost;
pub use scheduler::Scheduler;
