//! Domain module for Models

pub mod errors;
pub mod model;

pub use errors::*;
pub use model::Model;
