//! Pokemon records and write payloads.
//!
//! Fields other than `id`, `code` and `name` travel as an opaque JSON object
//! (`attributes`) that is flattened into the record when serialized. Their
//! schema is owned by the caller's validation layer, but the core field names
//! are reserved: an attribute named `id`, `code` or `name` is never stored,
//! since it would collide with the core field in the flattened document.

use crate::model::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by the core fields of [`Pokemon`].
pub const RESERVED_KEYS: [&str; 3] = ["id", "code", "name"];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Remove reserved keys from `attributes`, returning the removed key names.
pub fn strip_reserved(attributes: &mut Map<String, Value>) -> Vec<String> {
    let removed: Vec<String> = attributes
        .keys()
        .filter(|key| is_reserved(key))
        .cloned()
        .collect();
    for key in &removed {
        attributes.remove(key);
    }
    removed
}

/// A stored Pokemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Backend-assigned, immutable.
    pub id: ObjectId,
    /// Unique numeric code.
    pub code: i64,
    /// Unique, always lower-cased.
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Payload for creating a Pokemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPokemon {
    pub code: i64,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl NewPokemon {
    pub fn new(code: i64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// Add an attribute to the payload. Reserved keys are ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.attributes.insert(key, value);
        }
        self
    }

    /// Build the stored record under a backend-assigned id.
    pub fn into_pokemon(mut self, id: ObjectId) -> Pokemon {
        strip_reserved(&mut self.attributes);
        Pokemon {
            id,
            code: self.code,
            name: self.name,
            attributes: self.attributes,
        }
    }
}

/// Partial update. Only the fields that are present change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Top-level attribute keys to overwrite.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl PokemonPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overwrite an attribute. Reserved keys are ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.attributes.insert(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none() && self.attributes.is_empty()
    }

    /// Overlay this patch onto `pokemon` in place.
    pub fn apply_to(&self, pokemon: &mut Pokemon) {
        if let Some(code) = self.code {
            pokemon.code = code;
        }
        if let Some(name) = &self.name {
            pokemon.name = name.clone();
        }
        for (key, value) in self.attributes.iter().filter(|(key, _)| !is_reserved(key)) {
            pokemon.attributes.insert(key.clone(), value.clone());
        }
    }
}
