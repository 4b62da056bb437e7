//! Write-path normalization.
//!
//! Names are stored lower-cased and attributes that reuse a core field name
//! are dropped, so every payload is normalized before it reaches the backend.
//! Partial updates are written by id and answered with a merged view computed
//! locally. The view is not re-read from the backend: if
//! another writer touched the same record between resolution and write, the
//! view does not reflect that change.

use crate::error::{PokedexError, PokedexResult};
use crate::model::pokemon::strip_reserved;
use crate::model::{NewPokemon, Pokemon, PokemonPatch};
use crate::search::SearchKind;
use crate::service::errors::classify_write_error;
use crate::storage::StorageProvider;
use log::{debug, trace, warn};

/// Lower-case the name of a create payload.
pub fn normalize_for_create(mut payload: NewPokemon) -> NewPokemon {
    payload.name = payload.name.to_lowercase();
    drop_reserved(&mut payload.attributes);
    payload
}

/// Lower-case the name of a partial update, if present.
pub fn normalize_patch(mut patch: PokemonPatch) -> PokemonPatch {
    if let Some(name) = patch.name.take() {
        patch.name = Some(name.to_lowercase());
    }
    drop_reserved(&mut patch.attributes);
    patch
}

fn drop_reserved(attributes: &mut serde_json::Map<String, serde_json::Value>) {
    let removed = strip_reserved(attributes);
    if !removed.is_empty() {
        warn!("Ignoring attributes that shadow core fields: {:?}", removed);
    }
}

/// The entity as read at resolution time with `patch` overlaid.
pub fn merge_view(mut entity: Pokemon, patch: &PokemonPatch) -> Pokemon {
    patch.apply_to(&mut entity);
    entity
}

/// Normalize `patch`, write it to the resolved `entity` and return the merged view.
pub async fn apply_partial<S: StorageProvider>(
    storage: &S,
    entity: Pokemon,
    patch: PokemonPatch,
) -> PokedexResult<Pokemon> {
    let patch = normalize_patch(patch);
    trace!(
        "Partial update for {}: {}",
        entity.id,
        serde_json::to_string(&patch).unwrap_or_else(|_| "invalid json".to_string())
    );

    let result = storage
        .update_one(&entity.id, &patch)
        .await
        .map_err(classify_write_error)?;

    if result.matched_count == 0 {
        warn!("Pokemon {} was removed before the update was written", entity.id);
        return Err(PokedexError::not_found(
            SearchKind::OpaqueId,
            entity.id.to_hex(),
        ));
    }

    debug!(
        "Updated Pokemon {} (modified: {})",
        entity.id, result.modified_count
    );
    Ok(merge_view(entity, &patch))
}
