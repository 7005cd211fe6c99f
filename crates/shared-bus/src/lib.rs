//! # Shared Bus - Named Event Dispatch
//!
//! Decouples UI producers and consumers through named, typed channels.
//!
//! ## Rules
//!
//! - Components talk through channel names, never through direct references.
//! - The bus is an explicit object shared as `Arc<EventBus>`; there is no
//!   global instance.
//! - Every dispatch happens synchronously on the update thread.
//!
//! ## Dispatch Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Panel A    │                    │   Panel B    │
//! │              │  trigger_with()    │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │  "score" ─── │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shared_bus::{EventBus, Handler};
//!
//! let bus = EventBus::new();
//! let on_score = Handler::unary(|score: &u32| println!("score {score}"));
//! bus.subscribe("score", &on_score).unwrap();
//! bus.trigger_with("score", &5u32).unwrap();
//! bus.unsubscribe("score", &on_score);
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod errors;
pub mod handler;

// Re-export main types
pub use bus::{EventBus, TriggerReport};
pub use errors::BusError;
pub use handler::{ArgType, Handler, Signature};
