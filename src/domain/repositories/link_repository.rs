//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for stored links.
///
/// Implementations are the single source of truth for short code uniqueness
/// and click counts: `create` must reject duplicate codes at the storage
/// layer, and `increment_clicks` must be a single atomic update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its storage id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Returns every link, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Atomically increments `clicks` and sets `last_clicked` to now.
    ///
    /// Returns `Ok(false)` if the link no longer exists.
    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError>;

    /// Hard-deletes a link by id. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Hard-deletes a link by short code. Returns whether a row was removed.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
