//! # Middleware
//!
//! - [`validation`]: hyper-schema request validation.

pub mod validation;

pub use validation::{validation_middleware, HyperSchemaLayer, LayerConfig};
