//! Entity resolution: route a classified search token to the matching lookup.

use crate::error::{PokedexError, PokedexResult};
use crate::model::Pokemon;
use crate::search::{SearchKind, SearchToken, classify};
use crate::storage::{Filter, StorageProvider};
use log::{debug, error};

/// Classify `token` and resolve it.
pub async fn resolve<S: StorageProvider>(storage: &S, token: &str) -> PokedexResult<Pokemon> {
    let classified = classify(token);
    debug!("Search token '{}' classified as {}", token, classified.kind());
    resolve_classified(storage, &classified, token).await
}

/// Resolve an already classified token. `raw` is reported in `NotFound`.
pub async fn resolve_classified<S: StorageProvider>(
    storage: &S,
    classified: &SearchToken,
    raw: &str,
) -> PokedexResult<Pokemon> {
    let kind = classified.kind();

    let found = match classified {
        SearchToken::OpaqueId(id) => storage.find_by_id(id).await,
        SearchToken::NumericCode(number) => match number.as_code() {
            Some(code) => storage.find_one(&Filter::Code(code)).await,
            None => {
                debug!("Numeric token '{}' cannot match an integer code", raw);
                Ok(None)
            }
        },
        SearchToken::Name(name) => storage.find_one(&Filter::Name(name.to_lowercase())).await,
    }
    .map_err(|e| lookup_failure(kind, e))?;

    found.ok_or_else(|| {
        debug!("No Pokemon matched {} '{}'", kind, raw);
        PokedexError::not_found(kind, raw)
    })
}

fn lookup_failure<E: std::error::Error>(kind: SearchKind, err: E) -> PokedexError {
    error!("Lookup by {} failed: {}", kind, err);
    PokedexError::internal(format!("Lookup by {} failed: {}", kind, err))
}
