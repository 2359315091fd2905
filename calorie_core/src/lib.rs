#![forbid(unsafe_code)]

//! Core domain model and business logic for the Caltrack calorie tracker.
//!
//! This crate provides:
//! - Domain types (meals, workouts, summaries)
//! - Key-value store backends (file-backed, in-memory)
//! - Persistence gateway over the tracked records
//! - The calorie tracker itself
//! - View seam for presentation layers

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod gateway;
pub mod view;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use gateway::StorageGateway;
pub use view::{NullView, TrackerView};
pub use tracker::CalorieTracker;
