//! Pokedex registry core.
//!
//! Resolves one public identifier space onto stored Pokemon. A search token
//! may be a backend-assigned opaque id, a unique numeric code, or a unique
//! case-insensitive name; each is routed to the matching storage lookup.
//! Writes are normalized (names are stored lower-cased) and backend write
//! failures are reclassified into a small, stable error taxonomy.
//!
//! # Core Components
//!
//! - [`search::classify`] - Search-token classification
//! - [`PokemonService`] - Create, find, update and remove operations
//! - [`StorageProvider`] - Trait for implementing storage backends
//! - [`PokedexError`] - `NotFound`, `Conflict` and `InternalFailure`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pokedex::{NewPokemon, PokemonService, PokedexError};
//! use pokedex::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = PokemonService::new(InMemoryStorage::new());
//! service.create(NewPokemon::new(25, "Pikachu")).await?;
//!
//! match service.find("999999").await {
//!     Err(PokedexError::NotFound { kind, token }) => println!("no {} {}", kind, token),
//!     other => println!("{:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod search;
pub mod service;
pub mod storage;

// Re-export commonly used types for convenience
pub use error::{
    BuildError, BuildResult, ConflictFields, ErrorResponse, PokedexError, PokedexResult,
};
pub use model::{NewPokemon, ObjectId, Pokemon, PokemonPatch};
pub use search::{Number, SearchKind, SearchToken};
pub use service::{ListQuery, PokemonService, PokemonServiceBuilder, ServiceConfig};
pub use storage::{BackendError, InMemoryStorage, StorageProvider};
