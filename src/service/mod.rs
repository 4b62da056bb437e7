//! Pokemon service: the public operation surface over a pluggable storage backend.
//!
//! Each operation is a sequential unit of work: classify, resolve, write,
//! and classify any write error. No state is kept between calls.
//!
//! # Concurrency
//!
//! Updates read the entity and then write a partial change with no version
//! check. Two concurrent updates of the same entity race: the last completed
//! write wins, and the merged view returned to the earlier caller may not show
//! the later change.
//!
//! # Example Usage
//!
//! ```rust
//! use pokedex::model::{NewPokemon, PokemonPatch};
//! use pokedex::service::PokemonService;
//! use pokedex::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = PokemonService::new(InMemoryStorage::new());
//!
//! let pikachu = service.create(NewPokemon::new(25, "Pikachu")).await?;
//! assert_eq!(pikachu.name, "pikachu");
//!
//! let found = service.find("25").await?;
//! assert_eq!(found.id, pikachu.id);
//!
//! let raichu = service
//!     .update("pikachu", PokemonPatch::new().with_name("Raichu"))
//!     .await?;
//! assert_eq!(raichu.name, "raichu");
//!
//! service.remove(&pikachu.id.to_hex()).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod errors;
pub mod normalize;
pub mod resolver;

pub use builder::{PokemonServiceBuilder, ServiceConfig};
pub use errors::classify_write_error;

use crate::error::{PokedexError, PokedexResult};
use crate::model::{NewPokemon, ObjectId, Pokemon, PokemonPatch};
use crate::search::SearchKind;
use crate::storage::{Filter, StorageProvider};
use log::{debug, error, info, trace, warn};
use serde::{Deserialize, Serialize};

/// Pagination for [`PokemonService::find_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Maximum number of records; falls back to the configured default.
    pub limit: Option<usize>,
    /// Records to skip.
    pub offset: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Pokemon service with pluggable storage backend.
#[derive(Debug, Clone)]
pub struct PokemonService<S: StorageProvider> {
    storage: S,
    config: ServiceConfig,
}

impl<S: StorageProvider> PokemonService<S> {
    /// Create a service with default configuration.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, ServiceConfig::default())
    }

    /// Create a service with the given configuration.
    ///
    /// The configuration is not validated; use [`PokemonServiceBuilder`] for that.
    pub fn with_config(storage: S, config: ServiceConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Normalize the name and create a Pokemon.
    pub async fn create(&self, payload: NewPokemon) -> PokedexResult<Pokemon> {
        let payload = normalize::normalize_for_create(payload);
        info!("Creating Pokemon #{} '{}'", payload.code, payload.name);
        trace!(
            "Create data: {}",
            serde_json::to_string(&payload).unwrap_or_else(|_| "invalid json".to_string())
        );

        let created = self
            .storage
            .create(payload)
            .await
            .map_err(classify_write_error)?;

        debug!("Created Pokemon {} (#{})", created.id, created.code);
        Ok(created)
    }

    /// Resolve a search token (id, code or name).
    pub async fn find(&self, token: &str) -> PokedexResult<Pokemon> {
        resolver::resolve(&self.storage, token).await
    }

    /// List Pokemon ordered by code.
    pub async fn find_all(&self, query: &ListQuery) -> PokedexResult<Vec<Pokemon>> {
        let limit = self.config.effective_limit(query.limit);
        let offset = query.offset.unwrap_or(0);
        debug!("Listing Pokemon (offset: {}, limit: {})", offset, limit);

        self.storage.list(offset, limit).await.map_err(|e| {
            error!("Storage error during list: {}", e);
            PokedexError::internal(format!("Storage error during list: {}", e))
        })
    }

    /// Number of stored Pokemon.
    pub async fn count(&self) -> PokedexResult<usize> {
        self.storage.count().await.map_err(|e| {
            error!("Storage error during count: {}", e);
            PokedexError::internal(format!("Storage error during count: {}", e))
        })
    }

    /// Resolve `token` and apply `patch`, returning the merged view.
    pub async fn update(&self, token: &str, patch: PokemonPatch) -> PokedexResult<Pokemon> {
        let pokemon = self.find(token).await?;
        info!("Updating Pokemon {} (search: '{}')", pokemon.id, token);
        normalize::apply_partial(&self.storage, pokemon, patch).await
    }

    /// Delete by opaque id.
    pub async fn remove(&self, id: &str) -> PokedexResult<()> {
        info!("Removing Pokemon with id '{}'", id);

        // a malformed id cannot identify any record
        let Ok(object_id) = ObjectId::parse_str(id) else {
            warn!("Attempted to remove Pokemon with malformed id '{}'", id);
            return Err(PokedexError::not_found(SearchKind::OpaqueId, id));
        };

        let result = self
            .storage
            .delete_one(&Filter::Id(object_id))
            .await
            .map_err(|e| {
                error!("Storage error during delete: {}", e);
                PokedexError::internal(format!("Storage error during delete: {}", e))
            })?;

        if result.deleted_count == 0 {
            warn!("Attempted to remove non-existent Pokemon with id '{}'", id);
            return Err(PokedexError::not_found(SearchKind::OpaqueId, id));
        }

        debug!("Successfully removed Pokemon with id '{}'", id);
        Ok(())
    }

    /// Replace every stored Pokemon with `entries`.
    ///
    /// Entries are created in order; the first failing entry stops seeding and
    /// its classified error is returned.
    pub async fn seed(&self, entries: Vec<NewPokemon>) -> PokedexResult<usize> {
        info!("Seeding {} Pokemon", entries.len());

        self.storage.clear().await.map_err(|e| {
            error!("Storage error during clear: {}", e);
            PokedexError::internal(format!("Storage error during clear: {}", e))
        })?;

        let mut created = 0;
        for entry in entries {
            self.create(entry).await?;
            created += 1;
        }

        info!("Seeded {} Pokemon", created);
        Ok(created)
    }
}
