//! Persona system: department reference profiles in trait space.
//!
//! The registry is built once at startup (bundled reference personas or a
//! user-supplied TOML file) and passed by reference to the matcher.

pub mod registry;
pub mod types;

pub use registry::{PersonaRegistry, BUNDLED_PERSONAS_TOML};
pub use types::{Trait, TraitVector};
