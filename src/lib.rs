//! Procedural alien species, pixel-art portraits and persona chat.
//!
//! [`species::generate_species`] builds a descriptor for a planet,
//! [`portrait::generate_portrait`] draws it as a small PNG, and
//! [`chat`] lets an explorer talk to one member of the species while the
//! [`codex`] records what was revealed.

pub mod chat;
pub mod codex;
pub mod color;
pub mod descriptor;
pub mod portrait;
pub mod random;
pub mod seeds;
pub mod species;
