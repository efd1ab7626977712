//! Repository Module
//!
//! Backing store for advisors. The cache sits in front of it and falls back
//! to it on a miss.

mod memory;

pub use memory::InMemoryRepository;

use thiserror::Error;

use crate::models::Advisor;

// == Repository Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Advisor not found: {0}")]
    NotFound(i64),

    /// SIN must be unique across advisors
    #[error("Advisor with this SIN already exists.")]
    DuplicateSin,

    #[error("Repository lock poisoned")]
    Poisoned,
}

// == Advisor Repository ==
/// Persistence operations for advisors.
pub trait AdvisorRepository: Send + Sync {
    fn get_all(&self) -> Result<Vec<Advisor>, RepositoryError>;

    /// Returns None when no advisor has this id.
    fn get_by_id(&self, id: i64) -> Result<Option<Advisor>, RepositoryError>;

    /// Stores a new advisor under a freshly assigned id and returns it.
    fn create(&self, advisor: Advisor) -> Result<Advisor, RepositoryError>;

    /// Replaces the advisor with the same id.
    fn update(&self, advisor: Advisor) -> Result<Advisor, RepositoryError>;

    /// Returns false when no advisor has this id.
    fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
