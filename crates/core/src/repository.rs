//! Persistence port for persons.

use async_trait::async_trait;

use crate::error::PersonResult;
use crate::person::{CreatePerson, Person, PersonPatch};

/// Repository for person persistence operations.
///
/// Implementations are the only code allowed to touch the data store. Every
/// failure they report is a [`crate::PersonError`]; store-specific errors are
/// translated before they leave the implementation.
///
/// All methods are cancel-safe: dropping the returned future aborts the
/// in-flight store call. Implementations never retry or spawn background work.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a person and return it with its store-assigned id.
    async fn create(&self, params: CreatePerson) -> PersonResult<Person>;

    /// Fetch a person by id.
    ///
    /// Returns `Err(PersonError::NotFound)` if no such person exists.
    async fn get(&self, id: i64) -> PersonResult<Person>;

    /// List persons in store order, skipping `offset` rows.
    ///
    /// `limit == 0` means unbounded. An empty result is not an error.
    async fn list(&self, offset: u64, limit: u64) -> PersonResult<Vec<Person>>;

    /// Update exactly the fields present in `patch`.
    ///
    /// Returns `Ok(None)` without touching the store when the patch is empty,
    /// and `Err(PersonError::NotFound)` when no person has `patch.id`.
    async fn partial_update(&self, patch: PersonPatch) -> PersonResult<Option<Person>>;

    /// Delete a person by id.
    ///
    /// Returns `Err(PersonError::NotFound)` if no row was removed.
    async fn delete(&self, id: i64) -> PersonResult<()>;
}
