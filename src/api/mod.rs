//! API Module
//!
//! HTTP handlers and routing for the advisor REST API.
//!
//! # Endpoints
//! - `GET|POST /api/advisors` - List or create advisors
//! - `GET|PUT|DELETE /api/advisors/:id` - Read, replace, or delete one advisor
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
