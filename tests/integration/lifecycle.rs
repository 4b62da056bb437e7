//! Create / find / update / remove behaviour.

use crate::common::{in_memory_service, pikachu};
use pokedex::storage::{Filter, StorageProvider};
use pokedex::{NewPokemon, ObjectId, PokedexError, PokemonPatch, SearchKind};
use serde_json::json;

#[tokio::test]
async fn test_create_persists_lowercased_name() {
    let service = in_memory_service();

    let created = service.create(pikachu()).await.unwrap();
    assert_eq!(created.name, "pikachu");
    assert_eq!(created.code, 25);
    assert_eq!(created.attributes["type"], json!("electric"));

    let stored = service
        .storage()
        .find_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "pikachu");
}

#[tokio::test]
async fn test_find_by_each_token_kind() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();

    let tokens = [
        created.id.to_hex(),
        "25".to_string(),
        "pikachu".to_string(),
        "PIKACHU".to_string(),
    ];
    for token in tokens {
        let found = service.find(&token).await.unwrap();
        assert_eq!(found, created, "token {}", token);
    }
}

#[tokio::test]
async fn test_find_uppercase_id_resolves() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();

    let found = service.find(&created.id.to_hex().to_uppercase()).await.unwrap();
    assert_eq!(found.id, created.id);
}

#[tokio::test]
async fn test_find_missing_code_reports_numeric_kind() {
    let service = in_memory_service();
    service.create(pikachu()).await.unwrap();

    let err = service.find("999999").await.unwrap_err();
    assert_eq!(err, PokedexError::not_found(SearchKind::NumericCode, "999999"));
    assert_eq!(err.to_string(), "Pokemon with number \"999999\" not found");
}

#[tokio::test]
async fn test_numeric_looking_name_is_never_a_name_lookup() {
    let service = in_memory_service();
    // a name that is also a number can be stored but not resolved by name
    service.create(NewPokemon::new(1, "151")).await.unwrap();

    let err = service.find("151").await.unwrap_err();
    assert_eq!(err, PokedexError::not_found(SearchKind::NumericCode, "151"));
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();

    let view = service
        .update("pikachu", PokemonPatch::new().with_name("Raichu"))
        .await
        .unwrap();

    assert_eq!(view.name, "raichu");
    assert_eq!(view.id, created.id);
    assert_eq!(view.code, created.code);
    assert_eq!(view.attributes, created.attributes);

    let stored = service.find("raichu").await.unwrap();
    assert_eq!(stored, view);
    assert!(matches!(
        service.find("pikachu").await,
        Err(PokedexError::NotFound { kind: SearchKind::Name, .. })
    ));
}

#[tokio::test]
async fn test_update_overlays_attributes() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();

    let view = service
        .update(
            "25",
            PokemonPatch::new()
                .with_code(26)
                .with_attribute("weight", json!(30.0)),
        )
        .await
        .unwrap();

    assert_eq!(view.code, 26);
    assert_eq!(view.name, "pikachu");
    assert_eq!(view.attributes["type"], json!("electric"));
    assert_eq!(view.attributes["weight"], json!(30.0));
    assert_eq!(service.find("26").await.unwrap().id, created.id);
}

#[tokio::test]
async fn test_update_unknown_token_is_not_found() {
    let service = in_memory_service();

    let err = service
        .update("mewtwo", PokemonPatch::new().with_code(150))
        .await
        .unwrap_err();
    assert_eq!(err, PokedexError::not_found(SearchKind::Name, "mewtwo"));
}

#[tokio::test]
async fn test_update_writes_by_id_not_by_token() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();

    // renaming through a name token must still hit the same record
    service
        .update("Pikachu", PokemonPatch::new().with_name("Pichu"))
        .await
        .unwrap();
    service
        .update("pichu", PokemonPatch::new().with_code(172))
        .await
        .unwrap();

    let stored = service.find(&created.id.to_hex()).await.unwrap();
    assert_eq!(stored.name, "pichu");
    assert_eq!(stored.code, 172);
    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_remove_existing_then_find_is_not_found() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();
    let id = created.id.to_hex();

    service.remove(&id).await.unwrap();

    assert_eq!(
        service.find(&id).await.unwrap_err(),
        PokedexError::not_found(SearchKind::OpaqueId, id.clone())
    );
    assert_eq!(
        service.remove(&id).await.unwrap_err(),
        PokedexError::not_found(SearchKind::OpaqueId, id)
    );
}

#[tokio::test]
async fn test_remove_nonexistent_id_is_not_found() {
    let service = in_memory_service();
    let id = ObjectId::new().to_hex();

    let err = service.remove(&id).await.unwrap_err();
    assert_eq!(err, PokedexError::not_found(SearchKind::OpaqueId, id));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_remove_malformed_id_is_not_found() {
    let service = in_memory_service();
    service.create(pikachu()).await.unwrap();

    // codes and names are not accepted by remove
    for token in ["25", "pikachu", ""] {
        assert_eq!(
            service.remove(token).await.unwrap_err(),
            PokedexError::not_found(SearchKind::OpaqueId, token)
        );
    }
    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_remove() {
    let service = in_memory_service();
    let first = service.create(pikachu()).await.unwrap();
    service.remove(&first.id.to_hex()).await.unwrap();

    let second = service.create(pikachu()).await.unwrap();
    assert_ne!(first.id, second.id);
    assert!(
        service
            .storage()
            .find_one(&Filter::Id(first.id))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_large_code_resolves_exactly() {
    let service = in_memory_service();
    service
        .create(NewPokemon::new(9_007_199_254_740_992, "alpha"))
        .await
        .unwrap();

    assert_eq!(
        service.find("9007199254740993").await.unwrap_err(),
        PokedexError::not_found(SearchKind::NumericCode, "9007199254740993")
    );
    assert_eq!(service.find("9007199254740992").await.unwrap().name, "alpha");
}

#[tokio::test]
async fn test_reserved_attribute_keys_do_not_corrupt_records() {
    let service = in_memory_service();
    let payload: NewPokemon =
        serde_json::from_value(json!({"code": 1, "name": "X", "id": "zzz"})).unwrap();
    let created = service.create(payload).await.unwrap();

    let patch: PokemonPatch =
        serde_json::from_value(json!({"id": "yyy", "weight": 2})).unwrap();
    let view = service.update("x", patch).await.unwrap();

    let document = serde_json::to_string(&view).unwrap();
    let back: pokedex::Pokemon = serde_json::from_str(&document).unwrap();
    assert_eq!(back.id, created.id);
    assert!(!back.attributes.contains_key("id"));
    assert_eq!(back.attributes["weight"], json!(2));
}
