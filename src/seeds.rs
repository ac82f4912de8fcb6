//! Seed derivation for batch runs.
//!
//! A batch is driven by one master seed. Every item gets its own sub-seeds,
//! one per generation stage, so items can be produced in any order (or in
//! parallel) and any single item can be reproduced on its own.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Seeds for one generated item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSeeds {
    pub index: u64,
    /// Species descriptor generation.
    pub species: u64,
    /// Portrait drawing.
    pub portrait: u64,
}

impl ItemSeeds {
    pub fn for_item(master: u64, index: u64) -> Self {
        Self {
            index,
            species: derive_seed(master, index, "species"),
            portrait: derive_seed(master, index, "portrait"),
        }
    }
}

impl fmt::Display for ItemSeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} (species: {}, portrait: {})",
            self.index, self.species, self.portrait
        )
    }
}

/// Derive a stage seed from the master seed and item index.
pub fn derive_seed(master: u64, index: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    index.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}
