//! Application layer - Use cases and orchestration.
//!
//! Services here orchestrate domain logic through the domain ports (traits)
//! rather than concrete infrastructure.

pub mod services;

pub use services::{DocumentQa, IngestionService};
