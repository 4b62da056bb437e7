//! Integration suites against `PokemonService`.

pub mod conflicts;
pub mod lifecycle;
