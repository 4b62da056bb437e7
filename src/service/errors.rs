//! Reclassification of backend write errors.
//!
//! Runs once, right after a failed create or update call. Lookups and deletes
//! never pass through here; their not-found outcomes are produced directly.

use crate::error::PokedexError;
use crate::storage::BackendError;
use log::{error, warn};

/// Map a backend write error onto `Conflict` or `InternalFailure`.
pub fn classify_write_error<E: BackendError>(err: E) -> PokedexError {
    if err.is_uniqueness_violation() {
        let fields = err.conflicting_fields();
        warn!("Uniqueness violation on write: {}", err);
        return PokedexError::conflict(fields);
    }

    error!("Backend write failed: {}", err);
    PokedexError::internal(format!("Can't write Pokemon: {}", err))
}
