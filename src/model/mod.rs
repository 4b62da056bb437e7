//! Domain records: the opaque id and the Pokemon entity with its write payloads.

pub mod object_id;
pub mod pokemon;

pub use object_id::ObjectId;
pub use pokemon::{NewPokemon, Pokemon, PokemonPatch};
