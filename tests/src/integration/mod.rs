//! Integration scenarios.

mod event_flow;
mod panel_lifecycle;
mod runtime_session;
