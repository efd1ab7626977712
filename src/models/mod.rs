//! Request and Response models for the advisor API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod advisor;
pub mod responses;

// Re-export commonly used types
pub use advisor::{Advisor, HealthStatus, NewAdvisor};
pub use responses::{HealthResponse, StatsResponse};
