//! System prompt that puts the model in character as one individual of a
//! generated species.

use std::fmt::Write;

use super::ChatError;
use crate::descriptor::{PlanetDescriptor, SpeciesDescriptor, Tagged};

const UNKNOWN: &str = "unknown";

/// Value and tag of an optional trait, `("unknown", "")` when absent.
fn field(tagged: Option<&Tagged>) -> (String, &str) {
    match tagged {
        Some(t) => (t.value.to_string(), t.tag.as_str()),
        None => (UNKNOWN.to_string(), ""),
    }
}

/// `"<value> <tag>"`, the form every fact takes in the prompt.
fn fact(tagged: Option<&Tagged>) -> String {
    let (value, tag) = field(tagged);
    format!("{value} {tag}")
}

fn value(tagged: Option<&Tagged>) -> String {
    field(tagged).0
}

fn atmosphere_line(planet: &PlanetDescriptor) -> String {
    let atmosphere = planet.atmosphere.as_ref();
    let presence = atmosphere
        .and_then(|a| a.presence.clone())
        .unwrap_or_else(|| "a specific type".to_string());
    let pressure = atmosphere
        .and_then(|a| a.pressure)
        .map(|p| format!("{p:.3} atm"))
        .unwrap_or_else(|| "a certain pressure".to_string());
    let gases: Vec<String> = atmosphere
        .map(|a| {
            a.composition
                .iter()
                .filter(|(_, &percent)| percent > 0.1)
                .map(|(gas, percent)| format!("{gas} ({percent:.1}%)"))
                .collect()
        })
        .unwrap_or_default();
    let composition = if gases.is_empty() {
        "various trace gases".to_string()
    } else {
        gases.join(", ")
    };
    format!(
        "- Atmosphere: {presence} [PLANET_ATM_PRESENCE_TAG] ({pressure} [PLANET_ATM_PRESSURE_TAG]), \
         composed mainly of {composition} [PLANET_ATM_COMPOSITION_TAG].\n"
    )
}

const CRITICAL_INSTRUCTIONS: &str = "\
**CRITICAL INSTRUCTIONS FOR YOUR RESPONSE:**
1.  **ACT AS THE INDIVIDUAL:** Embody the persona of {NAME}. Your responses should reflect your specific occupation, personality traits, and the general cultural background provided. You are not just a generic representative.
2.  **MANDATORY TAG USAGE:** When you reveal specific information corresponding to ANY bracketed tag (e.g., [INDIVIDUAL_NAME_TAG], [NATIVE_PLANET_NAME_TAG], [PLANET_TEMP_TAG], [GOV_TYPE_TAG], [TRAIT_TELEPATHY_TAG]), you **MUST** include the exact tag immediately after that piece of information in your response. Example: \"My name is Zanor [INDIVIDUAL_NAME_TAG].\" or \"We call our world Xylos [NATIVE_PLANET_NAME_TAG].\" This is essential for the system interpreting your response.
3.  **GRADUAL REVELATION:** DO NOT reveal all information at once. Answer the human's questions naturally. Reveal tagged information only when directly asked or when it becomes highly relevant to the conversation flow. When referring to your homeworld, use its native name ({NATIVE}) unless the human uses their designation, in which case you can acknowledge it.
4.  **BE CURIOUS & CONSISTENT:** Ask the human questions about themselves and their world, reflecting your persona's curiosity or caution. Stay consistent with all provided details (persona, species, planet names, environment).
5.  **HANDLE UNKNOWN INFO:** If asked about something not covered, express uncertainty, state it's not relevant to your role/culture, or politely decline if sensitive, all according to your persona. DO NOT invent major new facts.
6.  **CONCISE & IN-CHARACTER:** Keep responses relatively brief (1-4 sentences typically) unless elaboration is needed. Maintain your alien perspective and personality throughout.
7.  **TAGS ARE INTERNAL:** The human cannot see the tags. Do not mention the brackets or the concept of tags to the human. They are purely instructions for you.";

/// Build the persona prompt. The species must carry an individual persona
/// and a native planet name.
pub fn system_prompt(
    planet: &PlanetDescriptor,
    species: &SpeciesDescriptor,
) -> Result<String, ChatError> {
    let persona = species
        .individual_persona
        .as_ref()
        .ok_or(ChatError::MissingPersona("individualPersona"))?;
    let native = species
        .native_planet_name
        .as_ref()
        .ok_or(ChatError::MissingPersona("nativePlanetName"))?;

    let physical = species.physical.clone().unwrap_or_default();
    let culture = species.cultural_aspects.clone().unwrap_or_default();
    let language = culture.language.clone().unwrap_or_default();
    let profile = species.interaction_profile.clone().unwrap_or_default();
    let (gender, gender_tag) = match &persona.gender_concept {
        Some(g) => (g.value.as_str(), g.tag.as_str()),
        None => ("an unknown concept", ""),
    };
    let human_name = value(species.planet_of_origin_name.as_ref());

    // Writing into a String cannot fail.
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "ROLE: You are {}, a member of the {} species.",
        fact(persona.name.as_ref()),
        fact(species.name.as_ref())
    );
    let _ = writeln!(
        prompt,
        "YOUR HOMEWORLD: Your species is from the planet known to humans as {}. \
         However, your people call your homeworld {}.",
        fact(species.planet_of_origin_name.as_ref()),
        fact(Some(native))
    );
    let _ = writeln!(
        prompt,
        "YOUR INDIVIDUALITY: Your occupation is {}. Your species' concept of gender/sex is {gender} {gender_tag}. \
         Your notable personality traits are: {}.",
        fact(persona.occupation.as_ref()),
        fact(persona.personality_traits.as_ref())
    );
    let _ = writeln!(
        prompt,
        "YOUR SPECIES' GENERAL DISPOSITION: While you have your own personality, your species is generally known for being {}.\n",
        fact(profile.initial_disposition.as_ref())
    );

    let temperature = planet
        .average_temperature()
        .map(|t| format!("{t:.1}°C"))
        .unwrap_or_else(|| "variable".to_string());
    let gravity = planet
        .gravity()
        .map(|g| g.to_string())
        .unwrap_or_else(|| "a specific level".to_string());
    let _ = writeln!(prompt, "CONTEXT FOR {human_name} (Human Designation):");
    let _ = writeln!(prompt, "- Average Surface Temperature: {temperature} [PLANET_TEMP_TAG]");
    prompt.push_str(&atmosphere_line(planet));
    let _ = writeln!(prompt, "- Gravity: {gravity}g [PLANET_GRAVITY_TAG]\n");

    prompt.push_str("SPECIES OVERVIEW (Background for your persona):\n");
    let _ = writeln!(
        prompt,
        "Physical Traits: {}; {}; {}; Head: {}; Avg Height: {}; Senses: {}.",
        fact(physical.body_type.as_ref()),
        fact(physical.skin_texture.as_ref()),
        fact(physical.appendages.as_ref()),
        fact(physical.head_features.as_ref()),
        fact(physical.average_height.as_ref()),
        fact(physical.primary_senses.as_ref())
    );
    if let Some(traits) = species.special_characteristics.as_ref().filter(|t| !t.is_empty()) {
        let listed: Vec<String> = traits
            .iter()
            .map(|sc| {
                let name = if sc.characteristic.is_empty() {
                    "A unique trait"
                } else {
                    &sc.characteristic
                };
                format!("{name} {}", sc.tag)
            })
            .collect();
        let _ = writeln!(prompt, "Special Species Traits: {}.", listed.join(", "));
    }
    let government = culture.government.clone().unwrap_or_default();
    let economy = culture.economy.clone().unwrap_or_default();
    let religion = culture.religion_philosophy.clone().unwrap_or_default();
    let _ = writeln!(
        prompt,
        "Culture: Language: {} ({}); Government: {}; Economy: {}; Beliefs: {}; Tech Level: {}; \
         Social Structure: {}; Art: {}.\n",
        fact(language.name.as_ref()),
        fact(language.structure_type.as_ref()),
        fact(government.kind.as_ref()),
        fact(economy.system.as_ref()),
        fact(religion.dominant_belief_name.as_ref()),
        fact(culture.technology_level.as_ref()),
        fact(culture.social_structure.as_ref()),
        fact(culture.art_expression.as_ref())
    );

    prompt.push_str("INTERACTION GOAL & STYLE:\n");
    let _ = writeln!(
        prompt,
        "You are communicating with a human explorer. Your personal communication style tends towards {}, \
         influenced by your traits: {}. Your species' key motivations are {}, which may guide your conversation.\n",
        fact(profile.communication_style.as_ref()),
        value(persona.personality_traits.as_ref()),
        fact(profile.key_motivations.as_ref())
    );

    prompt.push_str(
        &CRITICAL_INSTRUCTIONS
            .replace("{NAME}", &value(persona.name.as_ref()))
            .replace("{NATIVE}", &native.value.to_string()),
    );

    Ok(prompt)
}
