//! API Handlers
//!
//! HTTP request handlers for the advisor endpoints. Reads go through the
//! shared recency cache first and fall back to the repository; writes go to
//! the repository and then refresh or drop the cached copy. Each repository
//! call that touches the cache runs under the cache lock, so a miss never
//! writes back a row that a concurrent delete or update has replaced.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use tracing::{debug, info, warn};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{Advisor, HealthResponse, HealthStatus, NewAdvisor, StatsResponse};
use crate::repository::{AdvisorRepository, InMemoryRepository, RepositoryError};

/// Application state shared across all handlers.
///
/// Holds the single cache instance every request handler reads through.
#[derive(Clone)]
pub struct AppState {
    /// Advisors by id, most recently used kept
    pub cache: SharedCache<i64, Advisor>,
    /// Backing store
    pub repository: Arc<dyn AdvisorRepository>,
}

impl AppState {
    pub fn new(cache: SharedCache<i64, Advisor>, repository: Arc<dyn AdvisorRepository>) -> Self {
        Self { cache, repository }
    }

    /// Creates an AppState from configuration with an empty in-memory
    /// repository.
    ///
    /// Fails when the configured cache capacity is 0.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = SharedCache::new(config.cache_capacity)?;
        Ok(Self::new(cache, Arc::new(InMemoryRepository::new())))
    }
}

fn log_conflict(err: &RepositoryError) {
    if matches!(err, RepositoryError::DuplicateSin) {
        warn!("rejected advisor with duplicate SIN");
    }
}

/// Handler for GET /api/advisors
///
/// Lists every advisor straight from the repository.
pub async fn list_advisors(State(state): State<AppState>) -> Result<Json<Vec<Advisor>>> {
    let advisors = state.repository.get_all()?;
    Ok(Json(advisors))
}

/// Handler for GET /api/advisors/:id
///
/// Serves from the cache when resident, otherwise loads from the repository
/// and caches the result.
pub async fn get_advisor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Advisor>> {
    let advisor = state
        .cache
        .get_or_load(id, || {
            debug!(id, "advisor cache miss, loading from repository");
            state.repository.get_by_id(id)
        })
        .await?
        .ok_or(ServiceError::NotFound(id))?;

    Ok(Json(advisor))
}

/// Handler for POST /api/advisors
///
/// Assigns a random health status, stores the advisor, and caches it.
pub async fn create_advisor(
    State(state): State<AppState>,
    Json(req): Json<NewAdvisor>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Advisor>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let health_status = HealthStatus::generate(&mut rand::thread_rng());
    let advisor = req.into_advisor(health_status);
    let created = state
        .cache
        .put_with(|| {
            state
                .repository
                .create(advisor)
                .inspect_err(log_conflict)
                .map(|created| (created.id, created))
        })
        .await?;
    info!(id = created.id, ?health_status, "advisor created");

    let location = format!("/api/advisors/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// Handler for PUT /api/advisors/:id
///
/// Replaces the stored advisor and refreshes the cached copy.
pub async fn update_advisor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(advisor): Json<Advisor>,
) -> Result<StatusCode> {
    if advisor.id != id {
        return Err(ServiceError::InvalidRequest(format!(
            "Path id {} does not match body id {}",
            id, advisor.id
        )));
    }
    if let Some(error_msg) = advisor.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    state
        .cache
        .put_with(|| {
            state
                .repository
                .update(advisor)
                .inspect_err(log_conflict)
                .map(|updated| (id, updated))
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/advisors/:id
///
/// Removes the advisor from the repository, then from the cache.
pub async fn delete_advisor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let removed = state
        .cache
        .delete_with(&id, || state.repository.delete(id))
        .await?;
    if !removed {
        return Err(ServiceError::NotFound(id));
    }

    info!(id, "advisor deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
