//! # VanType Bench
//!
//! Synthetic type graphs for VanType performance testing.

pub mod models;

pub use models::{ModelShape, synthetic_manifest, synthetic_module};
