//! Storage abstraction layer for Pokemon records.
//!
//! The `StorageProvider` trait is the persistence capability the service layer
//! depends on. Implementations own id assignment and uniqueness enforcement;
//! the service never pre-checks uniqueness, it only reacts to the violation
//! errors a backend reports through [`BackendError`].
//!
//! # Architecture
//!
//! The storage layer is responsible for:
//! - Assigning opaque ids at creation
//! - Enforcing unique indexes on `code` and `name`
//! - Equality lookups and partial (`$set`-style) updates
//!
//! The storage layer is NOT responsible for:
//! - Classifying search tokens
//! - Lower-casing names
//! - Translating errors into the caller-facing taxonomy
//!
//! # Example Usage
//!
//! ```rust
//! use pokedex::model::{NewPokemon, PokemonPatch};
//! use pokedex::storage::{Filter, InMemoryStorage, StorageProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let created = storage.create(NewPokemon::new(25, "pikachu")).await?;
//! let found = storage.find_one(&Filter::Code(25)).await?;
//! assert_eq!(found, Some(created.clone()));
//!
//! let updated = storage
//!     .update_one(&created.id, &PokemonPatch::new().with_name("raichu"))
//!     .await?;
//! assert_eq!(updated.matched_count, 1);
//!
//! let deleted = storage.delete_one(&Filter::Id(created.id)).await?;
//! assert_eq!(deleted.deleted_count, 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::InMemoryStorage;

use crate::error::ConflictFields;
use crate::model::{NewPokemon, ObjectId, Pokemon, PokemonPatch};
use std::fmt;
use std::future::Future;

/// Equality filter on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Id(ObjectId),
    Code(i64),
    /// Compared exactly; callers lower-case before filtering.
    Name(String),
}

impl Filter {
    /// Whether `pokemon` satisfies this filter.
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        match self {
            Filter::Id(id) => pokemon.id == *id,
            Filter::Code(code) => pokemon.code == *code,
            Filter::Name(name) => pokemon.name == *name,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Id(id) => write!(f, "id={}", id),
            Filter::Code(code) => write!(f, "code={}", code),
            Filter::Name(name) => write!(f, "name={}", name),
        }
    }
}

/// Outcome of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Error capability every backend error type exposes.
///
/// Detecting a uniqueness violation is the backend's job: the service asks
/// through this trait instead of matching backend-specific codes.
pub trait BackendError: std::error::Error + Send + Sync + 'static {
    /// Whether this error reports a unique index violation.
    fn is_uniqueness_violation(&self) -> bool;

    /// Field/value pairs that collided. Empty when the backend does not say.
    fn conflicting_fields(&self) -> ConflictFields {
        ConflictFields::new()
    }
}

/// Persistence capability for Pokemon records.
///
/// # Key Design Decisions
///
/// - **Backend-assigned ids**: `create` receives a payload without an id and
///   returns the stored record with its new id.
/// - **Updates return counts, not documents**: callers that need the post-update
///   state project it themselves.
/// - **Empty results are not errors**: lookups return `None`, deletes report
///   `deleted_count == 0`.
pub trait StorageProvider: Send + Sync {
    /// The error type returned by storage operations.
    type Error: BackendError;

    /// Insert a new record.
    ///
    /// Fails with a uniqueness violation when `code` or `name` is taken.
    fn create(
        &self,
        payload: NewPokemon,
    ) -> impl Future<Output = Result<Pokemon, Self::Error>> + Send;

    /// Look up a record by id.
    fn find_by_id(
        &self,
        id: &ObjectId,
    ) -> impl Future<Output = Result<Option<Pokemon>, Self::Error>> + Send;

    /// Return the first record matching `filter`.
    fn find_one(
        &self,
        filter: &Filter,
    ) -> impl Future<Output = Result<Option<Pokemon>, Self::Error>> + Send;

    /// Overwrite the fields present in `patch` on the record with `id`.
    ///
    /// Fails with a uniqueness violation when the patched `code` or `name`
    /// belongs to another record.
    fn update_one(
        &self,
        id: &ObjectId,
        patch: &PokemonPatch,
    ) -> impl Future<Output = Result<UpdateResult, Self::Error>> + Send;

    /// Delete the first record matching `filter`.
    fn delete_one(
        &self,
        filter: &Filter,
    ) -> impl Future<Output = Result<DeleteResult, Self::Error>> + Send;

    /// List records ordered by ascending `code`.
    ///
    /// If `limit` is 0 or `offset` exceeds the total, the result is empty.
    fn list(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Pokemon>, Self::Error>> + Send;

    /// Total number of records.
    fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send;

    /// Remove every record.
    fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
