//! Uniqueness violations on create and update.

use crate::common::{in_memory_service, pikachu};
use pokedex::{ErrorResponse, NewPokemon, PokedexError, PokemonPatch};
use serde_json::json;

#[tokio::test]
async fn test_duplicate_name_conflicts_case_insensitively() {
    let service = in_memory_service();
    service.create(pikachu()).await.unwrap();

    let err = service
        .create(NewPokemon::new(26, "PIKACHU"))
        .await
        .unwrap_err();

    match &err {
        PokedexError::Conflict { fields } => {
            assert_eq!(fields.get("name"), Some(&json!("pikachu")));
        }
        other => panic!("Expected Conflict, got {:?}", other),
    }
    assert!(err.is_client_error());
    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let service = in_memory_service();
    service.create(pikachu()).await.unwrap();

    let err = service
        .create(NewPokemon::new(25, "raichu"))
        .await
        .unwrap_err();

    match err {
        PokedexError::Conflict { fields } => {
            assert_eq!(fields.get("code"), Some(&json!(25)));
            assert!(!fields.contains_key("name"));
        }
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_into_taken_name_conflicts_and_keeps_state() {
    let service = in_memory_service();
    service.create(pikachu()).await.unwrap();
    let raichu = service.create(NewPokemon::new(26, "raichu")).await.unwrap();

    let err = service
        .update("26", PokemonPatch::new().with_name("Pikachu"))
        .await
        .unwrap_err();
    assert!(matches!(err, PokedexError::Conflict { .. }));

    let stored = service.find("26").await.unwrap();
    assert_eq!(stored, raichu);
}

#[tokio::test]
async fn test_update_to_own_values_is_not_a_conflict() {
    let service = in_memory_service();
    let created = service.create(pikachu()).await.unwrap();

    let view = service
        .update("pikachu", PokemonPatch::new().with_code(25).with_name("PIKACHU"))
        .await
        .unwrap();
    assert_eq!(view, created);
}

#[tokio::test]
async fn test_conflict_response_exposes_fields() {
    let service = in_memory_service();
    service.create(pikachu()).await.unwrap();
    let err = service.create(pikachu()).await.unwrap_err();

    let response = ErrorResponse::from(&err);
    assert_eq!(response.status, 400);
    assert_eq!(response.error_code, "CONFLICT");
    assert!(response.message.contains("pikachu"));
    assert_eq!(
        response.fields.and_then(|f| f.get("name").cloned()),
        Some(json!("pikachu"))
    );
}
