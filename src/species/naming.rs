//! Syllable-based names for species, individuals, languages and homeworlds.

use rand::Rng;

use super::tables::*;
use crate::random::RandomSource;

/// Longest native planet name before falling back to a mythic single word.
const MAX_PLANET_NAME: usize = 20;

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    rng.choose_one(pool).copied().unwrap_or_default()
}

/// Prefix, optional midfix, suffix: "Zyl" + "oph" + "ari".
pub fn species_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = pick(rng, SPECIES_PREFIXES);
    let midfix = if rng.chance(0.4) {
        pick(rng, SPECIES_MIDFIXES)
    } else {
        ""
    };
    let suffix = pick(rng, SPECIES_SUFFIXES);
    format!("{prefix}{midfix}{suffix}")
}

pub fn individual_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = pick(rng, INDIVIDUAL_FIRST);
    let middle = if rng.chance(0.6) {
        pick(rng, INDIVIDUAL_MIDDLE)
    } else {
        ""
    };
    let last = pick(rng, INDIVIDUAL_LAST);
    if middle.is_empty() && rng.chance(0.2) {
        // Doubled ending instead of a middle syllable: "Kelakos".
        return format!("{first}{last}{}", pick(rng, INDIVIDUAL_LAST));
    }
    format!("{first}{middle}{last}")
}

pub fn language_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = pick(rng, LANGUAGE_PREFIXES);
    let suffix = pick(rng, LANGUAGE_SUFFIXES);
    let name = if rng.chance(0.3) {
        format!("{prefix}{}{suffix}", pick(rng, LANGUAGE_CONNECTORS))
    } else {
        format!("{prefix}{suffix}")
    };
    capitalize(&name, false)
}

/// The name the species itself uses for its homeworld.
pub fn native_planet_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    if rng.chance(0.2) {
        return pick(rng, PLANET_SINGLE_NAMES).to_string();
    }

    let mut name = String::new();
    for _ in 0..rng.int(1, 2) {
        name.push_str(pick(rng, PLANET_PREFIXES));
    }
    if rng.chance(0.65) {
        name.push_str(pick(rng, PLANET_MIDFIXES));
    }
    name.push_str(pick(rng, PLANET_SUFFIXES));

    let name = capitalize(&name, true);
    if name.is_empty() || name.chars().count() > MAX_PLANET_NAME {
        return pick(rng, PLANET_SINGLE_NAMES).to_string();
    }
    name
}

/// Uppercase the first character, optionally lowercasing the rest.
fn capitalize(text: &str, lower_rest: bool) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.collect();
            let rest = if lower_rest { rest.to_lowercase() } else { rest };
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_planet_names_are_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let name = native_planet_name(&mut rng);
            assert!(!name.is_empty());
            let single = PLANET_SINGLE_NAMES.contains(&name.as_str());
            assert!(single || name.chars().count() <= MAX_PLANET_NAME, "{}", name);
            if !single {
                let rest: String = name.chars().skip(1).collect();
                assert_eq!(rest, rest.to_lowercase());
            }
        }
    }

    #[test]
    fn test_species_name_parts() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let name = species_name(&mut rng);
            assert!(SPECIES_PREFIXES.iter().any(|p| name.starts_with(p)));
            assert!(SPECIES_SUFFIXES.iter().any(|s| name.ends_with(s)));
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("kli'osza", false), "Kli'osza");
        assert_eq!(capitalize("TerraNova", true), "Terranova");
        assert_eq!(capitalize("", true), "");
    }

    #[test]
    fn test_language_and_individual_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let lang = language_name(&mut rng);
            assert!(lang.chars().next().map_or(false, char::is_uppercase));
            let person = individual_name(&mut rng);
            assert!(INDIVIDUAL_FIRST.iter().any(|f| person.starts_with(f)));
        }
    }
}
