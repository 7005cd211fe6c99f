//! # Models Subsystem (st-04)
//!
//! Application state objects, one per type, listed explicitly at startup:
//!
//! ```text
//! ModelRegistry::builder()
//!     .register::<Score>()
//!     .register_with(|| Settings::load())
//!     .build()          ──▶ init() ──▶ update() per frame ──▶ clear()
//! ```
//!
//! A model whose factory or init hook fails is logged and left out; the
//! rest of the registry is unaffected.

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod service;

pub use domain::{Model, ModelError};
pub use service::{InitReport, ModelRegistry, ModelRegistryBuilder};
