//! Last Light — Character Catalog.
//!
//! Static reference data for the cast: names, ages, traits and relationship
//! affinities, plus the name lookups the narrative heuristics rely on.
//! Nothing here is mutated at runtime.

pub mod catalog;
pub mod character;
pub mod roster;

pub use character::{Character, Gender};
pub use roster::Roster;
