//! Ports module for Panel Layers
//!
//! Defines the inbound lookup port consumed by the panel loader.

pub mod inbound;

pub use inbound::LayerLookup;
