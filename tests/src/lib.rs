//! # Stratum Test Suite
//!
//! Cross-subsystem scenarios that exercise the runtime as a whole.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── event_flow.rs        # EventBus + LifecycleHost + Scheduler
//!     ├── panel_lifecycle.rs   # layers, loader, logic open/close
//!     └── runtime_session.rs   # UiRuntime end to end, JSON inputs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p st-tests
//! cargo test -p st-tests integration::panel_lifecycle
//! ```

pub mod integration;
