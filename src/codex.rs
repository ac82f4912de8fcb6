//! The explorer's codex of contacted species.
//!
//! Each entry keeps the full descriptors so the portrait can be redrawn,
//! plus what has actually been revealed in conversation. Portraits are
//! never stored; they are regenerated from the descriptors after load.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::extract_tags;
use crate::descriptor::{PlanetDescriptor, SpeciesDescriptor, Tagged};

/// Current save format.
pub const CODEX_VERSION: u32 = 2;
const UNREVEALED: &str = "???";

#[derive(Debug, thiserror::Error)]
pub enum CodexError {
    #[error("codex I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("codex file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("codex format version {found} is newer than this build can read")]
    UnsupportedVersion { found: u32 },
}

fn unrevealed() -> String {
    UNREVEALED.to_string()
}

/// The four headline facts shown on a codex card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedSummary {
    #[serde(default = "unrevealed")]
    pub species_name: String,
    #[serde(default = "unrevealed")]
    pub homeworld_name: String,
    #[serde(default = "unrevealed")]
    pub body_type: String,
    #[serde(default = "unrevealed")]
    pub tech_level: String,
}

impl Default for RevealedSummary {
    fn default() -> Self {
        Self {
            species_name: unrevealed(),
            homeworld_name: unrevealed(),
            body_type: unrevealed(),
            tech_level: unrevealed(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexEntry {
    pub species: SpeciesDescriptor,
    pub planet: PlanetDescriptor,
    #[serde(default)]
    pub revealed_summary: RevealedSummary,
    /// Tags revealed so far, in the order they first appeared.
    #[serde(default)]
    pub revealed_tags: Vec<String>,
}

impl CodexEntry {
    pub fn new(species: SpeciesDescriptor, planet: PlanetDescriptor) -> Self {
        Self {
            species,
            planet,
            revealed_summary: RevealedSummary::default(),
            revealed_tags: Vec::new(),
        }
    }

    pub fn species_name(&self) -> Option<String> {
        self.species.display_name()
    }

    /// Apply the tags in a model reply. Returns the tags that were new.
    ///
    /// Tags that do not belong to this species are ignored.
    pub fn record_reply(&mut self, reply: &str) -> Vec<String> {
        let known = revealable_facts(&self.species);
        let mut fresh = Vec::new();
        for tag in extract_tags(reply) {
            if !known.contains_key(&tag) || self.revealed_tags.contains(&tag) {
                continue;
            }
            self.update_summary(&tag);
            self.revealed_tags.push(tag.clone());
            fresh.push(tag);
        }
        fresh
    }

    fn update_summary(&mut self, tag: &str) {
        let s = &self.species;
        let matches = |field: Option<&Tagged>| field.filter(|t| t.tag == tag).map(|t| t.value.to_string());
        let physical = s.physical.as_ref();
        let culture = s.cultural_aspects.as_ref();

        if let Some(v) = matches(s.name.as_ref()) {
            self.revealed_summary.species_name = v;
        } else if let Some(v) = matches(s.native_planet_name.as_ref()) {
            self.revealed_summary.homeworld_name = v;
        } else if let Some(v) = matches(physical.and_then(|p| p.body_type.as_ref())) {
            self.revealed_summary.body_type = v;
        } else if let Some(v) = matches(culture.and_then(|c| c.technology_level.as_ref())) {
            self.revealed_summary.tech_level = v;
        }
    }

    /// Revealed tags paired with the fact each one stands for.
    pub fn revealed_facts(&self) -> Vec<(String, String)> {
        let known = revealable_facts(&self.species);
        self.revealed_tags
            .iter()
            .filter_map(|tag| known.get(tag).map(|fact| (tag.clone(), fact.clone())))
            .collect()
    }
}

/// Every tag in a species descriptor mapped to the fact it reveals.
///
/// Walks the serialized descriptor: any object with both `tag` and `value`
/// is a fact, and special characteristics read as "name: details".
pub fn revealable_facts(species: &SpeciesDescriptor) -> BTreeMap<String, String> {
    let mut facts = BTreeMap::new();
    if let Ok(value) = serde_json::to_value(species) {
        collect_facts(&value, &mut facts);
    }
    facts
}

fn collect_facts(value: &Value, facts: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            let tag = map.get("tag").and_then(Value::as_str).filter(|t| !t.is_empty());
            if let Some(tag) = tag {
                if let Some(v) = map.get("value") {
                    let text = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    facts.insert(tag.to_string(), text);
                    return;
                }
                if let Some(name) = map.get("characteristic").and_then(Value::as_str) {
                    let details = map
                        .get("details")
                        .and_then(Value::as_str)
                        .filter(|d| !d.is_empty())
                        .unwrap_or("No further details.");
                    facts.insert(tag.to_string(), format!("{name}: {details}"));
                    return;
                }
            }
            for child in map.values() {
                collect_facts(child, facts);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_facts(item, facts);
            }
        }
        _ => {}
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodexFile {
    version: u32,
    #[serde(default)]
    entries: Vec<CodexEntry>,
}

/// All contacted species, in contact order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Codex {
    entries: Vec<CodexEntry>,
}

impl Codex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CodexEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, species_name: &str) -> Option<&CodexEntry> {
        self.entries
            .iter()
            .find(|e| e.species_name().as_deref() == Some(species_name))
    }

    pub fn find_mut(&mut self, species_name: &str) -> Option<&mut CodexEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.species_name().as_deref() == Some(species_name))
    }

    /// Entry for this species, created on first contact. A species without
    /// a name always gets a fresh entry.
    pub fn contact(&mut self, species: &SpeciesDescriptor, planet: &PlanetDescriptor) -> &mut CodexEntry {
        let existing = species.display_name().and_then(|name| {
            self.entries
                .iter()
                .position(|e| e.species_name().as_deref() == Some(name.as_str()))
        });
        let index = match existing {
            Some(index) => {
                tracing::debug!(index, "re-contacted known species");
                index
            }
            None => {
                self.entries.push(CodexEntry::new(species.clone(), planet.clone()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Apply a reply to the named species' entry. Returns the new tags, or
    /// `None` when the species has not been contacted.
    pub fn record_reply(&mut self, species_name: &str, reply: &str) -> Option<Vec<String>> {
        self.find_mut(species_name).map(|entry| entry.record_reply(reply))
    }

    pub fn save(&self, path: &Path) -> Result<(), CodexError> {
        let file = CodexFile {
            version: CODEX_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)?;
        tracing::info!(entries = self.entries.len(), path = %path.display(), "codex saved");
        Ok(())
    }

    /// Load a codex. Older versions load with missing fields defaulted;
    /// newer versions are refused.
    pub fn load(path: &Path) -> Result<Self, CodexError> {
        let json = fs::read_to_string(path)?;
        let file: CodexFile = serde_json::from_str(&json)?;
        if file.version > CODEX_VERSION {
            return Err(CodexError::UnsupportedVersion { found: file.version });
        }
        if file.version < CODEX_VERSION {
            tracing::warn!(found = file.version, current = CODEX_VERSION, "loading older codex format");
        }
        Ok(Self { entries: file.entries })
    }

    /// Load if the file exists, otherwise start empty.
    pub fn load_or_default(path: &Path) -> Result<Self, CodexError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::generate_species;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generated() -> (SpeciesDescriptor, PlanetDescriptor) {
        let planet = PlanetDescriptor::with_temperature(12.0);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        (generate_species(&planet, &mut rng), planet)
    }

    #[test]
    fn test_contact_reuses_entry() {
        let (species, planet) = generated();
        let mut codex = Codex::new();
        codex.contact(&species, &planet);
        codex.contact(&species, &planet);
        assert_eq!(codex.entries().len(), 1);
        assert_eq!(codex.entries()[0].revealed_summary, RevealedSummary::default());
    }

    #[test]
    fn test_record_reply_updates_summary() {
        let (species, planet) = generated();
        let name = species.display_name().expect("name");
        let mut codex = Codex::new();
        codex.contact(&species, &planet);

        let reply = "We are the [SPECIES_NAME_TAG] people, builders at [TECH_LEVEL_TAG]. \
                     [SPECIES_NAME_TAG] [MADE_UP_TAG]";
        let fresh = codex.record_reply(&name, reply).expect("entry");
        assert_eq!(fresh, vec!["[SPECIES_NAME_TAG]", "[TECH_LEVEL_TAG]"]);

        let entry = codex.find(&name).expect("entry");
        assert_eq!(entry.revealed_summary.species_name, name);
        assert_ne!(entry.revealed_summary.tech_level, UNREVEALED);
        assert_eq!(entry.revealed_summary.homeworld_name, UNREVEALED);

        // Repeats are not new.
        assert!(codex.record_reply(&name, "[TECH_LEVEL_TAG]").expect("entry").is_empty());
        assert!(codex.record_reply("Nobody", "[TECH_LEVEL_TAG]").is_none());
    }

    #[test]
    fn test_revealable_facts_cover_characteristics() {
        let (species, _) = generated();
        let facts = revealable_facts(&species);
        assert!(facts.contains_key("[SPECIES_NAME_TAG]"));
        assert!(facts.contains_key("[PHYS_BODY_TYPE_TAG]"));
        for sc in species.special_characteristics.iter().flatten() {
            let fact = facts.get(&sc.tag).expect("characteristic tag");
            assert!(fact.starts_with(&sc.characteristic));
        }
    }

    #[test]
    fn test_save_and_load() {
        let (species, planet) = generated();
        let name = species.display_name().expect("name");
        let mut codex = Codex::new();
        codex.contact(&species, &planet);
        codex.record_reply(&name, "Our form is [PHYS_BODY_TYPE_TAG].");

        let path = std::env::temp_dir().join(format!("xeno_codex_{}.json", std::process::id()));
        codex.save(&path).expect("save");
        let text = fs::read_to_string(&path).expect("read");
        assert!(!text.contains("data:image"));
        let loaded = Codex::load(&path).expect("load");
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, codex);
        let entry = loaded.find(&name).expect("entry");
        assert_eq!(entry.revealed_facts().len(), 1);
        assert_ne!(entry.revealed_summary.body_type, UNREVEALED);
    }

    #[test]
    fn test_versions() {
        let dir = std::env::temp_dir();
        let newer = dir.join(format!("xeno_codex_newer_{}.json", std::process::id()));
        fs::write(&newer, r#"{"version": 99, "entries": []}"#).expect("write");
        let result = Codex::load(&newer);
        let _ = fs::remove_file(&newer);
        assert!(matches!(result, Err(CodexError::UnsupportedVersion { found: 99 })));

        let older = dir.join(format!("xeno_codex_older_{}.json", std::process::id()));
        fs::write(
            &older,
            r#"{"version": 1, "entries": [{"species": {"name": {"value": "Zyl", "tag": "[SPECIES_NAME_TAG]"}}, "planet": {}}]}"#,
        )
        .expect("write");
        let loaded = Codex::load(&older).expect("older loads");
        let _ = fs::remove_file(&older);
        let entry = loaded.find("Zyl").expect("entry");
        assert_eq!(entry.revealed_summary, RevealedSummary::default());
        assert!(entry.revealed_tags.is_empty());

        let missing = dir.join("xeno_codex_definitely_missing.json");
        assert!(Codex::load_or_default(&missing).expect("empty").is_empty());
    }
}
