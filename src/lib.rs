//! Advisor Cache - Advisor API with a bounded recency cache
//!
//! Serves advisor records from an in-memory repository, keeping the most
//! recently used ones in a fixed-capacity LRU cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use api::AppState;
pub use cache::{RecencyCache, SharedCache};
pub use config::Config;
pub use error::ServiceError;
