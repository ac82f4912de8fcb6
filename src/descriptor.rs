//! Species and planet descriptors.
//!
//! These mirror the JSON shape the species generator produces: every leaf
//! trait is a `{ value, tag }` pair, where the tag is the bracketed marker
//! the chat persona echoes back when it reveals that trait. All fields are
//! optional at the type level so partial or hand-written files still
//! deserialize; required fields are enforced by [`portrait_input`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The value half of a tagged trait.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(f64),
    Text(String),
}

impl TraitValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TraitValue::Text(text) => Some(text),
            TraitValue::Number(_) => None,
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Number(n) => write!(f, "{}", n),
            TraitValue::Text(text) => f.write_str(text),
        }
    }
}

/// A trait value with its reveal tag, e.g. `("Insectoid", "[PHYS_BODY_TYPE_TAG]")`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tagged {
    pub value: TraitValue,
    #[serde(default)]
    pub tag: String,
}

impl Tagged {
    pub fn text(value: impl Into<String>, tag: &str) -> Self {
        Self {
            value: TraitValue::Text(value.into()),
            tag: tag.to_string(),
        }
    }

    pub fn number(value: f64, tag: &str) -> Self {
        Self {
            value: TraitValue::Number(value),
            tag: tag.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicalTraits {
    pub body_type: Option<Tagged>,
    pub skin_texture: Option<Tagged>,
    pub appendages: Option<Tagged>,
    pub head_features: Option<Tagged>,
    pub average_height: Option<Tagged>,
    pub lifespan: Option<Tagged>,
    pub primary_senses: Option<Tagged>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialCharacteristic {
    pub characteristic: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub tag: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: Option<Tagged>,
    pub structure_type: Option<Tagged>,
    pub phonology_notes: Option<Tagged>,
    pub communication_method: Option<Tagged>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Government {
    #[serde(rename = "type")]
    pub kind: Option<Tagged>,
    pub power_structure: Option<Tagged>,
    pub citizen_rights: Option<Tagged>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Economy {
    pub system: Option<Tagged>,
    pub currency: Option<Tagged>,
    pub key_industries: Option<Tagged>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReligionPhilosophy {
    pub dominant_belief_name: Option<Tagged>,
    pub core_tenets: Option<Tagged>,
    pub rituals_practices: Option<Tagged>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CulturalAspects {
    pub language: Option<Language>,
    pub government: Option<Government>,
    pub economy: Option<Economy>,
    pub religion_philosophy: Option<ReligionPhilosophy>,
    pub technology_level: Option<Tagged>,
    pub social_structure: Option<Tagged>,
    pub art_expression: Option<Tagged>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionProfile {
    pub initial_disposition: Option<Tagged>,
    pub communication_style: Option<Tagged>,
    pub key_motivations: Option<Tagged>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenderConcept {
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndividualPersona {
    pub name: Option<Tagged>,
    pub gender_concept: Option<GenderConcept>,
    pub occupation: Option<Tagged>,
    pub personality_traits: Option<Tagged>,
}

/// Full description of a generated species and the individual contacted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeciesDescriptor {
    pub name: Option<Tagged>,
    pub planet_of_origin_name: Option<Tagged>,
    pub native_planet_name: Option<Tagged>,
    pub physical: Option<PhysicalTraits>,
    pub special_characteristics: Option<Vec<SpecialCharacteristic>>,
    pub cultural_aspects: Option<CulturalAspects>,
    pub interaction_profile: Option<InteractionProfile>,
    pub individual_persona: Option<IndividualPersona>,
}

impl SpeciesDescriptor {
    /// Species name value, if any.
    pub fn display_name(&self) -> Option<String> {
        self.name.as_ref().map(|name| name.value.to_string())
    }
}

/// True when any characteristic name mentions `needle` (case-insensitive).
pub fn mentions_characteristic<'a>(names: impl IntoIterator<Item = &'a str>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    names.into_iter().any(|name| name.to_lowercase().contains(&needle))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetGeneral {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub planet_type: Option<String>,
    pub gravity: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanetSurface {
    pub average_temperature: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub presence: Option<String>,
    pub pressure: Option<f64>,
    /// Gas name to percentage.
    pub composition: BTreeMap<String, f64>,
}

/// The planet a species lives on. Only the surface temperature matters to
/// the portrait; the rest feeds species generation and the chat prompt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetDescriptor {
    pub general: Option<PlanetGeneral>,
    pub surface: Option<PlanetSurface>,
    pub atmosphere: Option<Atmosphere>,
}

impl PlanetDescriptor {
    /// Minimal planet carrying only an average surface temperature.
    pub fn with_temperature(celsius: f64) -> Self {
        Self {
            surface: Some(PlanetSurface {
                average_temperature: Some(celsius),
            }),
            ..Self::default()
        }
    }

    pub fn average_temperature(&self) -> Option<f64> {
        self.surface.as_ref().and_then(|s| s.average_temperature)
    }

    pub fn gravity(&self) -> Option<f64> {
        self.general.as_ref().and_then(|g| g.gravity)
    }

    pub fn planet_type(&self) -> Option<&str> {
        self.general.as_ref().and_then(|g| g.planet_type.as_deref())
    }

    pub fn name(&self) -> Option<&str> {
        self.general.as_ref().and_then(|g| g.name.as_deref())
    }
}

/// Why a descriptor pair cannot be drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("species descriptor is empty")]
    EmptySpecies,
    #[error("planet descriptor is empty")]
    EmptyPlanet,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be a non-empty string")]
    BlankField(&'static str),
}

impl DescriptorError {
    /// Short uppercase label for the error placeholder image.
    pub fn label(&self) -> &'static str {
        match self {
            DescriptorError::EmptySpecies => "NO SPECIES",
            DescriptorError::EmptyPlanet => "NO PLANET",
            DescriptorError::MissingField(_) | DescriptorError::BlankField(_) => "CORE DATA",
        }
    }
}

/// The validated subset of the descriptors the portrait passes read.
#[derive(Clone, Copy, Debug)]
pub struct PortraitInput<'a> {
    pub body_type: &'a str,
    pub skin_texture: &'a str,
    pub appendages: &'a str,
    pub head_features: &'a str,
    pub special_characteristics: &'a [SpecialCharacteristic],
    pub average_temperature: f64,
}

/// Check the fields the portrait needs and borrow them.
pub fn portrait_input<'a>(
    species: &'a SpeciesDescriptor,
    planet: &'a PlanetDescriptor,
) -> Result<PortraitInput<'a>, DescriptorError> {
    if *species == SpeciesDescriptor::default() {
        return Err(DescriptorError::EmptySpecies);
    }
    if *planet == PlanetDescriptor::default() {
        return Err(DescriptorError::EmptyPlanet);
    }

    let physical = species
        .physical
        .as_ref()
        .ok_or(DescriptorError::MissingField("physical"))?;

    let body_type = required_text(&physical.body_type, "physical.bodyType")?;
    let skin_texture = required_text(&physical.skin_texture, "physical.skinTexture")?;
    let appendages = required_text(&physical.appendages, "physical.appendages")?;
    let head_features = required_text(&physical.head_features, "physical.headFeatures")?;

    let special_characteristics = species
        .special_characteristics
        .as_deref()
        .ok_or(DescriptorError::MissingField("specialCharacteristics"))?;

    let average_temperature = planet
        .average_temperature()
        .ok_or(DescriptorError::MissingField("surface.averageTemperature"))?;

    Ok(PortraitInput {
        body_type,
        skin_texture,
        appendages,
        head_features,
        special_characteristics,
        average_temperature,
    })
}

fn required_text<'a>(
    field: &'a Option<Tagged>,
    name: &'static str,
) -> Result<&'a str, DescriptorError> {
    let tagged = field.as_ref().ok_or(DescriptorError::MissingField(name))?;
    match tagged.as_text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(DescriptorError::BlankField(name)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal valid species used across the crate's tests.
    pub(crate) fn species(body: &str, skin: &str, appendages: &str, head: &str) -> SpeciesDescriptor {
        SpeciesDescriptor {
            name: Some(Tagged::text("Testari", "[SPECIES_NAME_TAG]")),
            physical: Some(PhysicalTraits {
                body_type: Some(Tagged::text(body, "[PHYS_BODY_TYPE_TAG]")),
                skin_texture: Some(Tagged::text(skin, "[PHYS_SKIN_TAG]")),
                appendages: Some(Tagged::text(appendages, "[PHYS_APPENDAGES_TAG]")),
                head_features: Some(Tagged::text(head, "[PHYS_HEAD_FEATURES_TAG]")),
                ..PhysicalTraits::default()
            }),
            special_characteristics: Some(Vec::new()),
            ..SpeciesDescriptor::default()
        }
    }

    #[test]
    fn test_valid_input_borrows_fields() {
        let s = species("Insectoid", "Chitinous plates", "6 limbs", "antennae");
        let p = PlanetDescriptor::with_temperature(20.0);
        let input = portrait_input(&s, &p).expect("valid");
        assert_eq!(input.body_type, "Insectoid");
        assert_eq!(input.head_features, "antennae");
        assert_eq!(input.average_temperature, 20.0);
    }

    #[test]
    fn test_missing_physical() {
        let mut s = species("Humanoid", "Fur", "4 limbs", "horns");
        s.physical = None;
        let p = PlanetDescriptor::with_temperature(0.0);
        assert_eq!(
            portrait_input(&s, &p).unwrap_err(),
            DescriptorError::MissingField("physical")
        );
    }

    #[test]
    fn test_blank_and_numeric_fields_rejected() {
        let p = PlanetDescriptor::with_temperature(0.0);
        let s = species("   ", "Fur", "4 limbs", "horns");
        assert_eq!(
            portrait_input(&s, &p).unwrap_err(),
            DescriptorError::BlankField("physical.bodyType")
        );

        let mut s = species("Humanoid", "Fur", "4 limbs", "horns");
        if let Some(physical) = s.physical.as_mut() {
            physical.skin_texture = Some(Tagged::number(3.0, "[PHYS_SKIN_TAG]"));
        }
        assert_eq!(
            portrait_input(&s, &p).unwrap_err(),
            DescriptorError::BlankField("physical.skinTexture")
        );
    }

    #[test]
    fn test_empty_descriptors() {
        let p = PlanetDescriptor::with_temperature(0.0);
        assert_eq!(
            portrait_input(&SpeciesDescriptor::default(), &p).unwrap_err(),
            DescriptorError::EmptySpecies
        );
        let s = species("Humanoid", "Fur", "4 limbs", "horns");
        assert_eq!(
            portrait_input(&s, &PlanetDescriptor::default()).unwrap_err(),
            DescriptorError::EmptyPlanet
        );
    }

    #[test]
    fn test_missing_temperature_and_characteristics() {
        let s = species("Humanoid", "Fur", "4 limbs", "horns");
        let p = PlanetDescriptor {
            general: Some(PlanetGeneral {
                name: Some("Kepler".into()),
                ..PlanetGeneral::default()
            }),
            ..PlanetDescriptor::default()
        };
        assert_eq!(
            portrait_input(&s, &p).unwrap_err(),
            DescriptorError::MissingField("surface.averageTemperature")
        );

        let mut s = s;
        s.special_characteristics = None;
        let p = PlanetDescriptor::with_temperature(5.0);
        assert_eq!(
            portrait_input(&s, &p).unwrap_err(),
            DescriptorError::MissingField("specialCharacteristics")
        );
    }

    #[test]
    fn test_parses_camel_case_json() {
        let json = r#"{
            "name": {"value": "Zylites", "tag": "[SPECIES_NAME_TAG]"},
            "physical": {
                "bodyType": {"value": "Avian", "tag": "[PHYS_BODY_TYPE_TAG]"},
                "skinTexture": {"value": "Feathered (plumage)", "tag": "[PHYS_SKIN_TAG]"},
                "appendages": {"value": "4 limbs (types: membranous wings)", "tag": "[PHYS_APPENDAGES_TAG]"},
                "headFeatures": {"value": "crested head", "tag": "[PHYS_HEAD_FEATURES_TAG]"}
            },
            "specialCharacteristics": [
                {"characteristic": "Natural Bioluminescence", "details": "glows", "tag": "[TRAIT_BIOLUMINESCENCE_TAG]"}
            ]
        }"#;
        let s: SpeciesDescriptor = serde_json::from_str(json).expect("parse");
        assert_eq!(s.display_name().as_deref(), Some("Zylites"));
        let names = s
            .special_characteristics
            .iter()
            .flatten()
            .map(|sc| sc.characteristic.as_str());
        assert!(mentions_characteristic(names.clone(), "BIOLUMINESCENCE"));
        assert!(!mentions_characteristic(names, "armor"));
        let planet: PlanetDescriptor =
            serde_json::from_str(r#"{"surface": {"averageTemperature": -55.5}, "general": {"type": "Ice World", "gravity": 0.4}}"#)
                .expect("parse planet");
        assert_eq!(planet.average_temperature(), Some(-55.5));
        assert_eq!(planet.planet_type(), Some("Ice World"));
        assert!(portrait_input(&s, &planet).is_ok());
    }
}
