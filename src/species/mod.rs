//! Procedural alien species.
//!
//! [`generate_species`] fills a complete [`SpeciesDescriptor`] from the
//! weighted pools in [`tables`], then lets the homeworld nudge the result:
//! scorching worlds breed heat resistance, low gravity stretches
//! human-sized bodies, and ocean or ice worlds mostly produce aquatic forms.
//! Every leaf carries the tag the chat persona uses when it reveals it.

pub mod naming;
pub mod tables;

use rand::Rng;

use crate::descriptor::{
    CulturalAspects, Economy, GenderConcept, Government, IndividualPersona, InteractionProfile,
    Language, PhysicalTraits, PlanetDescriptor, ReligionPhilosophy, SpecialCharacteristic,
    SpeciesDescriptor, Tagged,
};
use crate::random::RandomSource;
use tables::*;

/// Planets hotter than this (Celsius) grant heat resistance.
pub const HEAT_RESISTANCE_THRESHOLD: f64 = 100.0;
/// Planets lighter than this (in g) stretch human-sized species.
pub const LOW_GRAVITY_THRESHOLD: f64 = 0.5;
const MAX_CHARACTERISTICS: usize = 3;

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    rng.choose_one(pool).copied().unwrap_or_default()
}

fn pick_weighted<R: Rng + ?Sized>(rng: &mut R, pool: &[crate::random::Weighted<&'static str>]) -> &'static str {
    rng.choose_weighted(pool).copied().unwrap_or_default()
}

fn some_of<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str], sep: &str) -> String {
    let count = rng.int(1, 3) as usize;
    rng.choose_unique(pool, count).join(sep)
}

fn tagged(value: impl Into<String>, tag: &str) -> Option<Tagged> {
    Some(Tagged::text(value, tag))
}

fn characteristic(entry: &Characteristic) -> SpecialCharacteristic {
    SpecialCharacteristic {
        characteristic: entry.name.to_string(),
        details: entry.details.to_string(),
        tag: entry.tag.to_string(),
    }
}

/// Generate a species native to `planet`.
pub fn generate_species<R: Rng + ?Sized>(planet: &PlanetDescriptor, rng: &mut R) -> SpeciesDescriptor {
    let mut physical = physical_traits(rng);

    let count = rng.int(1, MAX_CHARACTERISTICS as i32) as usize;
    let mut special: Vec<SpecialCharacteristic> = rng
        .choose_unique(SPECIAL_CHARACTERISTICS, count)
        .iter()
        .map(characteristic)
        .collect();

    let culture = cultural_aspects(rng);
    let interaction = InteractionProfile {
        initial_disposition: tagged(pick_weighted(rng, DISPOSITIONS), "[DISPOSITION_INITIAL_TAG]"),
        communication_style: tagged(pick(rng, COMMUNICATION_STYLES), "[COMM_STYLE_TAG]"),
        key_motivations: tagged(some_of(rng, MOTIVATIONS, "; "), "[MOTIVATION_KEYS_TAG]"),
    };

    apply_planet_influence(planet, &mut physical, &mut special, rng);
    let persona = individual_persona(&culture, rng);

    let species = SpeciesDescriptor {
        name: tagged(naming::species_name(rng), "[SPECIES_NAME_TAG]"),
        planet_of_origin_name: tagged(planet.name().unwrap_or("Unknown"), "[PLANET_NAME_TAG_REF]"),
        native_planet_name: tagged(naming::native_planet_name(rng), "[NATIVE_PLANET_NAME_TAG]"),
        physical: Some(physical),
        special_characteristics: Some(special),
        cultural_aspects: Some(culture),
        interaction_profile: Some(interaction),
        individual_persona: Some(persona),
    };
    tracing::debug!(
        name = %species.display_name().unwrap_or_default(),
        "species generated"
    );
    species
}

fn physical_traits<R: Rng + ?Sized>(rng: &mut R) -> PhysicalTraits {
    let body = pick_weighted(rng, BODY_TYPES);
    let skin = pick_weighted(rng, SKIN_TEXTURES);

    let limbs = rng
        .choose_weighted(LIMB_COUNTS)
        .copied()
        .unwrap_or(LimbCount::Exactly(4));
    let appendages = match limbs {
        LimbCount::Exactly(0) => pick(rng, LIMBLESS_FORMS).to_string(),
        LimbCount::Exactly(n) => {
            let kinds = rng.int(1, 2) as usize;
            let types = rng.choose_unique(LIMB_TYPES, kinds).join(", ");
            format!("{n} limbs (types: {types})")
        }
        LimbCount::Many => "multiple (10+) limbs".to_string(),
    };

    let height = rng.choose_one(HEIGHT_BANDS).copied().unwrap_or(HEIGHT_BANDS[2]);
    let meters = rng.float(height.min, height.max);
    let lifespan = rng.choose_one(LIFESPAN_BANDS).copied().unwrap_or(LIFESPAN_BANDS[1]);
    let years = rng.int(lifespan.min as i32, lifespan.max as i32);

    PhysicalTraits {
        body_type: tagged(body, "[PHYS_BODY_TYPE_TAG]"),
        skin_texture: tagged(skin, "[PHYS_SKIN_TAG]"),
        appendages: tagged(appendages, "[PHYS_APPENDAGES_TAG]"),
        head_features: tagged(pick(rng, HEAD_FEATURES), "[PHYS_HEAD_FEATURES_TAG]"),
        average_height: tagged(
            format!("{meters:.1} meters ({})", height.description),
            "[PHYS_HEIGHT_TAG]",
        ),
        lifespan: tagged(
            format!("{years} standard years ({})", lifespan.description),
            "[PHYS_LIFESPAN_TAG]",
        ),
        primary_senses: tagged(some_of(rng, PRIMARY_SENSES, ", "), "[PHYS_SENSES_TAG]"),
    }
}

fn cultural_aspects<R: Rng + ?Sized>(rng: &mut R) -> CulturalAspects {
    CulturalAspects {
        language: Some(Language {
            name: tagged(naming::language_name(rng), "[LANG_NAME_TAG]"),
            structure_type: tagged(pick(rng, LANGUAGE_STRUCTURES), "[LANG_STRUCTURE_TYPE_TAG]"),
            phonology_notes: tagged(pick(rng, PHONOLOGY_NOTES), "[LANG_PHONOLOGY_TAG]"),
            communication_method: tagged(pick(rng, COMMUNICATION_METHODS), "[LANG_COMM_METHOD_TAG]"),
        }),
        government: Some(Government {
            kind: tagged(pick_weighted(rng, GOVERNMENT_TYPES), "[GOV_TYPE_TAG]"),
            power_structure: tagged(pick(rng, POWER_STRUCTURES), "[GOV_POWER_STRUCTURE_TAG]"),
            citizen_rights: tagged(pick(rng, CITIZEN_RIGHTS), "[GOV_CITIZEN_RIGHTS_TAG]"),
        }),
        economy: Some(Economy {
            system: tagged(pick_weighted(rng, ECONOMIC_SYSTEMS), "[ECON_SYSTEM_TAG]"),
            currency: tagged(pick(rng, CURRENCIES), "[ECON_CURRENCY_TAG]"),
            key_industries: tagged(some_of(rng, KEY_INDUSTRIES, ", "), "[ECON_INDUSTRIES_TAG]"),
        }),
        religion_philosophy: Some(ReligionPhilosophy {
            dominant_belief_name: tagged(pick(rng, BELIEF_NAMES), "[BELIEF_NAME_TAG]"),
            core_tenets: tagged(pick(rng, CORE_TENETS), "[BELIEF_TENETS_TAG]"),
            rituals_practices: tagged(pick(rng, RITUALS), "[BELIEF_RITUALS_TAG]"),
        }),
        technology_level: tagged(pick_weighted(rng, TECHNOLOGY_LEVELS), "[TECH_LEVEL_TAG]"),
        social_structure: tagged(pick_weighted(rng, SOCIAL_STRUCTURES), "[SOCIAL_STRUCTURE_TAG]"),
        art_expression: tagged(pick(rng, ART_EXPRESSIONS), "[ART_EXPRESSION_TAG]"),
    }
}

fn text_of(field: &Option<Tagged>) -> String {
    field
        .as_ref()
        .and_then(Tagged::as_text)
        .unwrap_or_default()
        .to_lowercase()
}

fn apply_planet_influence<R: Rng + ?Sized>(
    planet: &PlanetDescriptor,
    physical: &mut PhysicalTraits,
    special: &mut Vec<SpecialCharacteristic>,
    rng: &mut R,
) {
    let hot = planet
        .average_temperature()
        .map_or(false, |t| t > HEAT_RESISTANCE_THRESHOLD);
    if hot && special.len() < MAX_CHARACTERISTICS && !special.iter().any(|sc| sc.tag == HEAT_RESISTANCE.tag) {
        special.push(characteristic(&HEAT_RESISTANCE));
    }

    let light = planet.gravity().map_or(false, |g| g < LOW_GRAVITY_THRESHOLD);
    if let Some(height) = physical.average_height.as_mut().filter(|_| light) {
        let stretched = height
            .as_text()
            .filter(|text| text.contains("Human-sized"))
            .map(|text| text.replace("Human-sized", "Tall and gracile due to low gravity"));
        if let Some(text) = stretched {
            *height = Tagged::text(text, &height.tag);
        }
    }

    let watery = matches!(planet.planet_type(), Some("Ocean Planet") | Some("Ice World"));
    if watery && rng.chance(0.7) && !text_of(&physical.body_type).contains("aquatic") {
        physical.body_type = tagged(pick(rng, AQUATIC_BODY_TYPES), "[PHYS_BODY_TYPE_TAG]");
        physical.appendages = tagged(pick(rng, AQUATIC_APPENDAGES), "[PHYS_APPENDAGES_TAG]");
        let adapted = special
            .iter()
            .any(|sc| sc.characteristic.to_lowercase().contains("aquatic"));
        if !adapted && special.len() < MAX_CHARACTERISTICS {
            special.push(characteristic(&AQUATIC_ADAPTATION));
        }
    }
}

/// Occupations open to an individual given the species' culture.
fn occupation_pool(culture: &CulturalAspects) -> Vec<&'static str> {
    let tech = text_of(&culture.technology_level);
    let government = culture
        .government
        .as_ref()
        .map(|g| text_of(&g.kind))
        .unwrap_or_default();
    let social = text_of(&culture.social_structure);

    let mut pool: Vec<&'static str> = OCCUPATIONS_ANY.to_vec();
    if tech.contains("industrial") {
        pool.extend_from_slice(OCCUPATIONS_INDUSTRIAL);
    }
    if tech.contains("information") {
        pool.extend_from_slice(OCCUPATIONS_INFORMATION);
    }
    if tech.contains("spacefaring") {
        pool.extend_from_slice(OCCUPATIONS_SPACEFARING);
    }
    if tech.contains("advanced interstellar") || tech.contains("transcendent") {
        pool.extend_from_slice(OCCUPATIONS_ADVANCED);
    }
    if government.contains("theocracy") {
        pool.extend(OCCUPATIONS_SOCIETAL.iter().filter(|o| o.contains("Oracle") || o.contains("Priest")));
    }
    if social.contains("guild") {
        pool.extend(OCCUPATIONS_SOCIETAL.iter().filter(|o| o.contains("Guild")));
    }

    let mut seen = std::collections::HashSet::new();
    pool.retain(|o| seen.insert(*o));
    pool
}

fn individual_persona<R: Rng + ?Sized>(culture: &CulturalAspects, rng: &mut R) -> IndividualPersona {
    let gender = rng.choose_weighted(GENDER_CONCEPTS).copied();
    let occupations = occupation_pool(culture);

    let count = rng.int(1, 3);
    let mut traits: Vec<&str> = Vec::new();
    while traits.len() < count as usize {
        let roll: f64 = rng.gen();
        let pool = if roll < 0.4 {
            TRAITS_POSITIVE
        } else if roll < 0.7 {
            TRAITS_NEGATIVE
        } else {
            TRAITS_QUIRKS
        };
        let candidate = pick(rng, pool);
        if !traits.contains(&candidate) {
            traits.push(candidate);
        }
    }

    IndividualPersona {
        name: tagged(naming::individual_name(rng), "[INDIVIDUAL_NAME_TAG]"),
        gender_concept: gender.map(|g| GenderConcept {
            value: g.value.to_string(),
            description: g.description.to_string(),
            tag: "[INDIVIDUAL_GENDER_TAG]".to_string(),
        }),
        occupation: tagged(pick(rng, &occupations), "[INDIVIDUAL_OCCUPATION_TAG]"),
        personality_traits: tagged(traits.join(", "), "[INDIVIDUAL_TRAITS_TAG]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{portrait_input, PlanetGeneral, PlanetSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn planet(kind: &str, temperature: f64, gravity: f64) -> PlanetDescriptor {
        PlanetDescriptor {
            general: Some(PlanetGeneral {
                name: Some("Kepler-442b".to_string()),
                planet_type: Some(kind.to_string()),
                gravity: Some(gravity),
            }),
            surface: Some(PlanetSurface {
                average_temperature: Some(temperature),
            }),
            atmosphere: None,
        }
    }

    #[test]
    fn test_generated_species_is_drawable() {
        let p = planet("Terrestrial", 18.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let s = generate_species(&p, &mut rng);
            assert!(portrait_input(&s, &p).is_ok());
            let n = s.special_characteristics.as_ref().map_or(0, Vec::len);
            assert!((1..=MAX_CHARACTERISTICS).contains(&n));
            assert_eq!(
                s.planet_of_origin_name.as_ref().and_then(Tagged::as_text),
                Some("Kepler-442b")
            );
        }
    }

    #[test]
    fn test_special_characteristics_are_unique() {
        let p = planet("Terrestrial", 18.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let s = generate_species(&p, &mut rng);
            let tags: Vec<&str> = s.special_characteristics.iter().flatten().map(|c| c.tag.as_str()).collect();
            let mut dedup = tags.clone();
            dedup.sort_unstable();
            dedup.dedup();
            assert_eq!(tags.len(), dedup.len());
        }
    }

    #[test]
    fn test_hot_planet_adds_heat_resistance_when_room() {
        let p = planet("Lava Planet", 450.0, 1.2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut saw = false;
        for _ in 0..50 {
            let s = generate_species(&p, &mut rng);
            let special = s.special_characteristics.unwrap_or_default();
            assert!(special.len() <= MAX_CHARACTERISTICS);
            let heat = special.iter().any(|c| c.tag == HEAT_RESISTANCE.tag);
            saw |= heat;
            if special.len() < MAX_CHARACTERISTICS {
                assert!(heat);
            }
        }
        assert!(saw);
    }

    #[test]
    fn test_low_gravity_stretches_human_sized() {
        let p = planet("Terrestrial", 10.0, 0.3);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let s = generate_species(&p, &mut rng);
            let height = s
                .physical
                .and_then(|ph| ph.average_height)
                .and_then(|h| h.as_text().map(str::to_string))
                .unwrap_or_default();
            assert!(!height.contains("Human-sized"), "{}", height);
        }
    }

    #[test]
    fn test_ocean_worlds_favor_aquatic() {
        let p = planet("Ocean Planet", 12.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut aquatic_forms = 0;
        for _ in 0..100 {
            let s = generate_species(&p, &mut rng);
            let physical = s.physical.unwrap_or_default();
            let appendages = text_of(&physical.appendages);
            if AQUATIC_APPENDAGES.iter().any(|a| a.to_lowercase() == appendages) {
                aquatic_forms += 1;
            }
        }
        assert!(aquatic_forms > 50, "{}", aquatic_forms);
    }

    #[test]
    fn test_occupations_follow_technology() {
        let culture = CulturalAspects {
            technology_level: tagged("Pre-Industrial (Stone/Bronze/Iron Age equivalent)", "[TECH_LEVEL_TAG]"),
            government: Some(Government {
                kind: tagged("Theocracy", "[GOV_TYPE_TAG]"),
                ..Government::default()
            }),
            ..CulturalAspects::default()
        };
        let pool = occupation_pool(&culture);
        assert!(pool.contains(&"Oracle/Diviner (Theocracy)"));
        assert!(!pool.contains(&"Pilot/Navigator"));

        let culture = CulturalAspects {
            technology_level: tagged("Interstellar (FTL capability, widespread star system colonization)", "[TECH_LEVEL_TAG]"),
            ..CulturalAspects::default()
        };
        assert_eq!(occupation_pool(&culture), OCCUPATIONS_ANY.to_vec());
    }

    #[test]
    fn test_every_leaf_is_tagged() {
        let p = planet("Terrestrial", 18.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let s = generate_species(&p, &mut rng);
        let json = serde_json::to_value(&s).expect("json");
        fn walk(v: &serde_json::Value) {
            if let Some(map) = v.as_object() {
                if map.contains_key("value") {
                    let tag = map.get("tag").and_then(|t| t.as_str()).unwrap_or_default();
                    assert!(tag.starts_with('[') && tag.contains("_TAG"), "{:?}", map);
                } else {
                    map.values().for_each(walk);
                }
            } else if let Some(items) = v.as_array() {
                items.iter().for_each(walk);
            }
        }
        walk(&json);
    }
}
