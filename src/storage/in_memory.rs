//! In-memory storage implementation for Pokemon records.
//!
//! This module provides a thread-safe in-memory implementation of the
//! `StorageProvider` trait using a HashMap behind an async RwLock. It behaves
//! like a document collection with unique indexes on `name` and `code`, and is
//! meant for tests, development and embedding.
//!
//! # Features
//!
//! * Thread-safe concurrent access with async RwLock
//! * Unique index enforcement reported as [`StorageError::DuplicateKey`]
//! * Ids assigned with [`ObjectId::new`]
//! * Consistent ordering (by `code`) for list operations
//!
//! # Example Usage
//!
//! ```rust
//! use pokedex::model::NewPokemon;
//! use pokedex::storage::{BackendError, InMemoryStorage, StorageProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//! storage.create(NewPokemon::new(25, "pikachu")).await?;
//!
//! let err = storage.create(NewPokemon::new(26, "pikachu")).await.unwrap_err();
//! assert!(err.is_uniqueness_violation());
//! # Ok(())
//! # }
//! ```

use crate::model::{NewPokemon, ObjectId, Pokemon, PokemonPatch};
use crate::storage::{DeleteResult, Filter, StorageError, StorageProvider, UpdateResult};
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory storage implementation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<ObjectId, Pokemon>>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, ordered by code.
    pub async fn snapshot(&self) -> Vec<Pokemon> {
        let data_guard = self.data.read().await;
        sorted(data_guard.values())
    }

    // Unique indexes are checked in declaration order: name, then code.
    fn check_unique(
        data: &HashMap<ObjectId, Pokemon>,
        code: Option<i64>,
        name: Option<&str>,
        exclude: Option<&ObjectId>,
    ) -> Result<(), StorageError> {
        let others = || data.values().filter(move |p| Some(&p.id) != exclude);

        if let Some(name) = name {
            if others().any(|p| p.name == name) {
                return Err(StorageError::duplicate_key("name", name));
            }
        }
        if let Some(code) = code {
            if others().any(|p| p.code == code) {
                return Err(StorageError::duplicate_key("code", code));
            }
        }
        Ok(())
    }
}

fn sorted<'a>(records: impl Iterator<Item = &'a Pokemon>) -> Vec<Pokemon> {
    let mut records: Vec<Pokemon> = records.cloned().collect();
    records.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.id.cmp(&b.id)));
    records
}

impl StorageProvider for InMemoryStorage {
    type Error = StorageError;

    async fn create(&self, payload: NewPokemon) -> Result<Pokemon, Self::Error> {
        let mut data_guard = self.data.write().await;

        Self::check_unique(&data_guard, Some(payload.code), Some(&payload.name), None)?;

        let mut id = ObjectId::new();
        while data_guard.contains_key(&id) {
            id = ObjectId::new();
        }

        let pokemon = payload.into_pokemon(id);
        data_guard.insert(id, pokemon.clone());
        trace!("Inserted document {}", id);

        Ok(pokemon)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Pokemon>, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard.get(id).cloned())
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Pokemon>, Self::Error> {
        let data_guard = self.data.read().await;

        if let Filter::Id(id) = filter {
            return Ok(data_guard.get(id).cloned());
        }

        Ok(sorted(data_guard.values().filter(|p| filter.matches(p)))
            .into_iter()
            .next())
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        patch: &PokemonPatch,
    ) -> Result<UpdateResult, Self::Error> {
        let mut data_guard = self.data.write().await;

        if !data_guard.contains_key(id) {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        }

        Self::check_unique(&data_guard, patch.code, patch.name.as_deref(), Some(id))?;

        let modified = match data_guard.get_mut(id) {
            Some(current) => {
                let before = current.clone();
                patch.apply_to(current);
                *current != before
            }
            None => false,
        };

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, Self::Error> {
        let mut data_guard = self.data.write().await;

        let target = match filter {
            Filter::Id(id) => data_guard.contains_key(id).then_some(*id),
            _ => sorted(data_guard.values().filter(|p| filter.matches(p)))
                .first()
                .map(|p| p.id),
        };

        let deleted_count = match target {
            Some(id) => u64::from(data_guard.remove(&id).is_some()),
            None => 0,
        };

        Ok(DeleteResult { deleted_count })
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Pokemon>, Self::Error> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let data_guard = self.data.read().await;
        Ok(sorted(data_guard.values())
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count(&self) -> Result<usize, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard.len())
    }

    async fn clear(&self) -> Result<(), Self::Error> {
        let mut data_guard = self.data.write().await;
        data_guard.clear();
        Ok(())
    }
}
