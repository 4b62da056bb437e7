//! Fault-injecting storage backend.
//!
//! Wraps [`InMemoryStorage`] and reports failures the way a document-database
//! driver does: server errors carry a numeric code, and duplicate keys use
//! code 11000 with the offending key/value pairs attached.

use pokedex::model::{NewPokemon, ObjectId, Pokemon, PokemonPatch};
use pokedex::storage::{
    BackendError, DeleteResult, Filter, InMemoryStorage, StorageError, StorageProvider,
    UpdateResult,
};
use pokedex::ConflictFields;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Errors as reported by the simulated driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("E{code} {message}")]
    Server {
        code: i32,
        message: String,
        key_value: Option<ConflictFields>,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BackendError for DriverError {
    fn is_uniqueness_violation(&self) -> bool {
        match self {
            DriverError::Server { code, .. } => *code == DUPLICATE_KEY_CODE,
            DriverError::Storage(e) => e.is_uniqueness_violation(),
        }
    }

    fn conflicting_fields(&self) -> ConflictFields {
        match self {
            DriverError::Server { key_value, .. } => key_value.clone().unwrap_or_default(),
            DriverError::Storage(e) => e.conflicting_fields(),
        }
    }
}

/// Which operations fail next.
#[derive(Debug, Default)]
struct FaultPlan {
    reads: Option<(i32, String)>,
    writes: Option<(i32, String)>,
    deletes: Option<(i32, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct FaultyStorage {
    inner: InMemoryStorage,
    plan: Arc<Mutex<FaultPlan>>,
    calls: Arc<AtomicUsize>,
}

impl FaultyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &InMemoryStorage {
        &self.inner
    }

    /// Fail every lookup and listing with a server error.
    pub fn fail_reads(&self, code: i32, message: &str) {
        self.plan.lock().unwrap().reads = Some((code, message.to_string()));
    }

    /// Fail every create and update with a server error.
    pub fn fail_writes(&self, code: i32, message: &str) {
        self.plan.lock().unwrap().writes = Some((code, message.to_string()));
    }

    pub fn fail_deletes(&self, code: i32, message: &str) {
        self.plan.lock().unwrap().deletes = Some((code, message.to_string()));
    }

    pub fn heal(&self) {
        *self.plan.lock().unwrap() = FaultPlan::default();
    }

    /// Number of backend calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(
        &self,
        pick: impl Fn(&FaultPlan) -> &Option<(i32, String)>,
    ) -> Result<(), DriverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let plan = self.plan.lock().unwrap();
        match pick(&plan) {
            Some((code, message)) => Err(DriverError::Server {
                code: *code,
                message: message.clone(),
                key_value: None,
            }),
            None => Ok(()),
        }
    }
}

impl StorageProvider for FaultyStorage {
    type Error = DriverError;

    async fn create(&self, payload: NewPokemon) -> Result<Pokemon, Self::Error> {
        self.check(|p| &p.writes)?;
        Ok(self.inner.create(payload).await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Pokemon>, Self::Error> {
        self.check(|p| &p.reads)?;
        Ok(self.inner.find_by_id(id).await?)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Pokemon>, Self::Error> {
        self.check(|p| &p.reads)?;
        Ok(self.inner.find_one(filter).await?)
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        patch: &PokemonPatch,
    ) -> Result<UpdateResult, Self::Error> {
        self.check(|p| &p.writes)?;
        Ok(self.inner.update_one(id, patch).await?)
    }

    async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, Self::Error> {
        self.check(|p| &p.deletes)?;
        Ok(self.inner.delete_one(filter).await?)
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Pokemon>, Self::Error> {
        self.check(|p| &p.reads)?;
        Ok(self.inner.list(offset, limit).await?)
    }

    async fn count(&self) -> Result<usize, Self::Error> {
        self.check(|p| &p.reads)?;
        Ok(self.inner.count().await?)
    }

    async fn clear(&self) -> Result<(), Self::Error> {
        self.check(|p| &p.deletes)?;
        Ok(self.inner.clear().await?)
    }
}
