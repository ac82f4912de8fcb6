//! Static pools for species generation.
//!
//! Plain string pools are picked uniformly; `Weighted` pools through
//! [`RandomSource::choose_weighted`](crate::random::RandomSource::choose_weighted).

use crate::random::{w, Weighted};

// ============================================================================
// NAME PARTS
// ============================================================================

pub const SPECIES_PREFIXES: &[&str] = &[
    "K'th", "Zyl", "Vor", "Gral", "Nym", "Xant", "Plex", "Hyl", "Jor", "Flar", "Myr", "Quil",
    "Vex", "Zeph", "Cryl",
];

pub const SPECIES_MIDFIXES: &[&str] = &[
    "oo", "aa", "enn", "arr", "iss", "org", "ypt", "ilium", "andr", "oph", "argon", "eon", "yth",
];

pub const SPECIES_SUFFIXES: &[&str] = &[
    "arr", "ons", "ians", "ites", "oids", "lings", "ari", "esi", "um", "ians", "aki", "tar",
    "eni", "yx", "qor",
];

pub const INDIVIDUAL_FIRST: &[&str] = &[
    "Zan", "Kel", "Ryn", "Vor", "Lys", "Jax", "Pyr", "Fen", "Gor", "Sil", "Brev", "Caz", "Nix",
    "Taz", "Ulm",
];

pub const INDIVIDUAL_MIDDLE: &[&str] = &["'el", "a", "i", "u", "or", "an", "et", "os", "ik", "az", "yr", "on"];

pub const INDIVIDUAL_LAST: &[&str] = &[
    "ak", "os", "en", "is", "ar", "et", "ix", "on", "us", "al", "or", "ez", "yl", "im", "az",
];

pub const PLANET_PREFIXES: &[&str] = &[
    "Terra", "Aqua", "Ignis", "Aer", "Silva", "Kryll", "Xylo", "Zeno", "Myco", "Geo", "Lithos",
    "Cryo", "Helio", "Umbra", "Lux", "Kai", "Shen", "Coru", "Val", "Rhun", "Aethel", "Bao", "Jor",
    "Ky'than", "Ophir", "Sol",
];

pub const PLANET_MIDFIXES: &[&str] = &[
    "nova", "prime", "mundi", "terra", "luna", "solara", "umbra", "virens", "caelum", "profundus",
    "saxum", "glacies", "dor", "goth", "nar", "seth", "val", "din", "mir", "bora", "theon",
    "kastra", "neer", "heim",
];

pub const PLANET_SUFFIXES: &[&str] = &[
    "a", "ia", "os", "us", "um", "prime", "alpha", "omega", "sanctum", "major", "minor", "nex",
    "gard", "polis", "terra", "mond", "grad", "stan", "lia", "nesos", "ria", "topia", "sphere",
    "world", "home", "star", "jewel",
];

pub const PLANET_SINGLE_NAMES: &[&str] = &[
    "Avalon", "Hyperion", "Yggdrasil", "Olympus", "Elysium", "Nirvana", "Arcadia", "Eden",
    "Ky'lar", "Solitude", "Sanctuary", "The Cradle", "The Source", "First Home", "Ancient Heart",
    "The Core", "The Wellspring", "The Silent World", "The Verdant Sphere",
];

pub const LANGUAGE_PREFIXES: &[&str] = &["Xyl'", "Kli'", "Gro'", "Vex", "Zor'", "Nym", "J'tak", "Floo", "Ryl", "Skree"];
pub const LANGUAGE_SUFFIXES: &[&str] = &["ian", "ese", "ic", "ani", "u", "os", "aki", "tek", "qor", "za"];
pub const LANGUAGE_CONNECTORS: &[&str] = &["'a", "i'", "el", "on", "u"];

// ============================================================================
// PHYSICAL TRAITS
// ============================================================================

pub const BODY_TYPES: &[Weighted<&str>] = &[
    w("Humanoid", 10),
    w("Insectoid", 8),
    w("Reptilian", 7),
    w("Avian", 6),
    w("Molluscoid (Cephalopod-like)", 5),
    w("Molluscoid (Gastropod-like)", 4),
    w("Amphibian", 5),
    w("Arachnoid", 4),
    w("Crustacean-like", 3),
    w("Plant-like (Mobile Flora)", 3),
    w("Crystalline/Mineral-based", 2),
    w("Energy-based (Non-corporeal)", 1),
    w("Amorphous/Shapeshifting", 2),
    w("Aquatic Mammalian (Dolphin-like)", 3),
    w("Aquatic Fish-like", 3),
    w("Fungoid (Mobile Fungi)", 2),
    w("Avian-Reptilian Hybrid", 3),
    w("Mammalian-Insectoid Hybrid", 2),
];

pub const SKIN_TEXTURES: &[Weighted<&str>] = &[
    w("Smooth, leathery skin", 10),
    w("Chitinous plates", 8),
    w("Overlapping scales (reptilian)", 7),
    w("Feathered (plumage)", 6),
    w("Gelatinous, translucent membrane", 5),
    w("Rough, bark-like hide", 4),
    w("Segmented exoskeleton", 7),
    w("Fine, dense fur", 6),
    w("Rocky, mineral-encrusted hide", 3),
    w("Bioluminescent, patterned skin", 4),
    w("Slimy, mucus-coated skin", 3),
    w("Photosynthetic, leaf-like integument", 2),
    w("Crystalline facets", 2),
    w("Shifting, iridescent scales (fish-like)", 4),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimbCount {
    Exactly(u32),
    /// "multiple (10+)"
    Many,
}

pub const LIMB_COUNTS: &[Weighted<LimbCount>] = &[
    w(LimbCount::Exactly(2), 5),
    w(LimbCount::Exactly(4), 10),
    w(LimbCount::Exactly(6), 7),
    w(LimbCount::Exactly(8), 4),
    w(LimbCount::Exactly(0), 2),
    w(LimbCount::Many, 1),
];

pub const LIMB_TYPES: &[&str] = &[
    "manipulator claws",
    "tentacles",
    "jointed legs",
    "powerful talons",
    "delicate cilia",
    "prehensile tails",
    "membranous wings",
    "fin-like flippers",
    "root-like tendrils",
    "psionically controlled tendrils",
];

pub const LIMBLESS_FORMS: &[&str] = &[
    "Serpentine body, no distinct limbs",
    "Slug-like form, no distinct limbs",
    "Amorphous, primarily pseudopods for locomotion",
];

pub const HEAD_FEATURES: &[&str] = &[
    "multiple eyes (e.g., 2-8)",
    "no visible eyes",
    "large single occulus",
    "antennae",
    "mandibles",
    "proboscis",
    "crested head",
    "auroral display around head",
    "no distinct head",
];

/// A numeric range with its size or age class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

const fn band(min: f64, max: f64, description: &'static str) -> Band {
    Band { min, max, description }
}

pub const HEIGHT_BANDS: &[Band] = &[
    band(0.3, 0.8, "Diminutive"),
    band(0.8, 1.5, "Small"),
    band(1.5, 2.5, "Human-sized"),
    band(2.5, 4.0, "Large"),
    band(4.0, 10.0, "Towering"),
    band(0.1, 15.0, "Extremely Variable (Amorphous/Colonial)"),
];

pub const LIFESPAN_BANDS: &[Band] = &[
    band(20.0, 50.0, "Short-lived"),
    band(50.0, 150.0, "Human-like lifespan"),
    band(150.0, 500.0, "Long-lived"),
    band(500.0, 2000.0, "Venerable"),
    band(
        10.0,
        10000.0,
        "Extremely Variable (e.g., due to hibernation, regeneration, or being hive-based)",
    ),
];

pub const PRIMARY_SENSES: &[&str] = &[
    "Vision (standard spectrum)",
    "Vision (infrared)",
    "Vision (ultraviolet)",
    "Hearing (sonic)",
    "Hearing (ultrasonic/infrasonic)",
    "Olfaction (chemoreception)",
    "Gustation (contact chemoreception)",
    "Tactition (touch/pressure)",
    "Thermoreception (heat/cold)",
    "Electroreception",
    "Magnetoreception",
    "Echolocation",
    "Vibration Sense (substrate)",
    "Psionic/Empathic Sense",
    "Gravitational Sense",
];

// ============================================================================
// SPECIAL CHARACTERISTICS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Characteristic {
    pub name: &'static str,
    pub details: &'static str,
    pub tag: &'static str,
}

const fn trait_entry(name: &'static str, details: &'static str, tag: &'static str) -> Characteristic {
    Characteristic { name, details, tag }
}

pub const SPECIAL_CHARACTERISTICS: &[Characteristic] = &[
    trait_entry("Telepathic Communication", "Can transmit and receive thoughts directly with others of their kind, and sometimes with other species, though often imprecisely.", "[TRAIT_TELEPATHY_TAG]"),
    trait_entry("Silicon-based Biochemistry", "Their biological processes are based on silicon compounds rather than carbon, allowing survival in extreme temperatures.", "[TRAIT_SILICON_LIFE_TAG]"),
    trait_entry("Natural Bioluminescence", "Emit light from specialized organs or skin patterns, used for communication, camouflage, or mating displays.", "[TRAIT_BIOLUMINESCENCE_TAG]"),
    trait_entry("Bio-Electric Discharge", "Can generate and discharge significant electrical currents for defense, hunting, or tool manipulation.", "[TRAIT_BIOELECTRICITY_TAG]"),
    trait_entry("Extreme Regeneration", "Capable of regenerating lost limbs or even significant portions of their body.", "[TRAIT_REGENERATION_TAG]"),
    trait_entry("Phase-Shifting/Cloaking", "Can temporarily become invisible or intangible by shifting their molecular structure or bending light.", "[TRAIT_PHASESHIFT_TAG]"),
    trait_entry("Symbiotic Relationship", "Live in a crucial, mutually beneficial relationship with another (possibly non-sentient) native organism.", "[TRAIT_SYMBIOSIS_TAG]"),
    trait_entry("Hive Mind/Collective Consciousness", "Individual minds are linked, contributing to a shared consciousness or group intelligence.", "[TRAIT_HIVEMIND_TAG]"),
    trait_entry("Psionic Abilities (Minor)", "Exhibit minor telekinetic or precognitive abilities, often uncontrolled or intuitive.", "[TRAIT_PSIONICS_MINOR_TAG]"),
    trait_entry("Adaptable Exoskeleton/Shell", "Can rapidly alter the density or composition of their outer shell in response to environmental threats.", "[TRAIT_ADAPTIVE_SHELL_TAG]"),
    trait_entry("Extreme Environmental Tolerance", "Adapted to survive in conditions lethal to most carbon-based life (e.g., vacuum, extreme radiation, high pressure).", "[TRAIT_EXTREME_TOLERANCE_TAG]"),
    trait_entry("Non-Verbal Language Dominance", "Primary communication relies on complex pheromones, color changes, or intricate dances rather than sound.", "[TRAIT_NONVERBAL_LANG_TAG]"),
    trait_entry("Lithovoric/Rock-Eating", "Derive sustenance from consuming and processing minerals and rocks.", "[TRAIT_LITHOVORE_TAG]"),
    trait_entry("Cyclical Lifecycle", "Undergo dramatic metamorphoses or distinct life stages (e.g., larval, chrysalis, adult).", "[TRAIT_CYCLICAL_LIFE_TAG]"),
    trait_entry("Naturally Armored", "Possess thick natural plating, spines, or other defensive physical structures.", "[TRAIT_NATURAL_ARMOR_TAG]"),
];

pub const HEAT_RESISTANCE: Characteristic = trait_entry(
    "Exceptional Heat Resistance",
    "Possesses biological adaptations to thrive in extremely high temperatures found on their homeworld.",
    "[TRAIT_HEAT_RESISTANCE_TAG]",
);

pub const AQUATIC_ADAPTATION: Characteristic = trait_entry(
    "Aquatic Adaptation",
    "Fully adapted to an aquatic or semi-aquatic lifestyle, capable of breathing underwater or holding breath for extended periods.",
    "[TRAIT_AQUATIC_ADAPT_TAG]",
);

pub const AQUATIC_BODY_TYPES: &[&str] = &[
    "Aquatic Mammalian (Whale-like)",
    "Aquatic Fish-like",
    "Amphibious Humanoid",
    "Molluscoid (Cephalopod-like)",
];

pub const AQUATIC_APPENDAGES: &[&str] = &[
    "Powerful fins and tail fluke",
    "Multiple prehensile tentacles",
    "Webbed limbs and streamlined body",
];

// ============================================================================
// INDIVIDUALS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gender {
    pub value: &'static str,
    pub description: &'static str,
}

pub const GENDER_CONCEPTS: &[Weighted<Gender>] = &[
    w(Gender { value: "Binary (similar to human male/female)", description: "Species primarily exhibits two distinct biological sexes and/or social gender roles." }, 5),
    w(Gender { value: "Multiple Genders (3+ distinct roles/identities)", description: "Society recognizes three or more distinct genders, potentially with different biological or social functions." }, 3),
    w(Gender { value: "Agender/Genderless", description: "Species lacks biological sex differentiation or the concept of social gender entirely." }, 4),
    w(Gender { value: "Hermaphroditic/Sequential Hermaphroditism", description: "Individuals possess both male and female reproductive capabilities, possibly changing sex during their lifespan." }, 3),
    w(Gender { value: "Fluid/Non-binary Spectrum", description: "Gender identity is fluid, changeable, or exists outside of fixed categories." }, 2),
    w(Gender { value: "Role-Based (Gender determined by social role/caste)", description: "Social roles or caste determine 'gender' identity, rather than biology." }, 2),
    w(Gender { value: "Hive-Based (e.g., Queen, Drone, Worker)", description: "Reproduction and social roles are dictated by a hive structure with specialized biological forms." }, 1),
    w(Gender { value: "Incomprehensible/Alien", description: "Gender/sex concepts are fundamentally different and difficult to map to human understanding (e.g., based on psychic resonance, life cycle stage)." }, 1),
];

pub const OCCUPATIONS_ANY: &[&str] = &[
    "Storyteller/Historian", "Artist (Sculptor/Painter/Musician)", "Healer/Medic",
    "Spiritual Leader/Priest", "Elder/Advisor", "Hunter/Gatherer", "Farmer/Cultivator",
    "Caregiver/Nurturer", "Guard/Warrior", "Trader/Merchant (local)",
    "Craftsperson (Potter/Weaver/Smith)",
];

pub const OCCUPATIONS_INDUSTRIAL: &[&str] = &[
    "Factory Worker", "Engineer (Mechanical/Civil)", "Scientist (Basic Research)",
    "Teacher/Educator", "Bureaucrat/Administrator", "Merchant (Regional/Global)",
    "Law Enforcer/Investigator", "Journalist/Record Keeper",
];

pub const OCCUPATIONS_INFORMATION: &[&str] = &[
    "Programmer/Data Analyst", "Network Technician", "Virtual Reality Designer",
    "Information Broker", "Geneticist/Bio-engineer", "Psychologist/Sociologist",
    "Media Producer/Influencer",
];

pub const OCCUPATIONS_SPACEFARING: &[&str] = &[
    "Pilot/Navigator", "Astronaut/Explorer", "Ship Engineer/Mechanic", "Planetary Surveyor",
    "Xeno-biologist/Xeno-linguist", "Diplomat/Ambassador", "Asteroid Miner",
    "Terraforming Specialist", "Station Commander", "FTL Drive Technician",
];

pub const OCCUPATIONS_ADVANCED: &[&str] = &[
    "Astro-engineer (Megastructures)", "Energy Matrix Overseer",
    "Consciousness Uplift Facilitator", "Galactic Cartographer", "AI Symbiosis Coordinator",
    "Temporal Flow Analyst (speculative)", "Species Archivist (Living Library)",
];

pub const OCCUPATIONS_SOCIETAL: &[&str] = &[
    "Oracle/Diviner (Theocracy)", "Guild Master (Guild-based)",
    "Gladiator/Pit Fighter (Hierarchical/Militaristic)",
    "Philosopher-King's Advisor (Technocracy/Monarchy)",
    "Commune Organizer (Anarcho-syndicalist)", "Corporate Executive (Corporate Hegemony)",
    "Knight/Retainer (Feudal)", "Psionic Empath (Hive Mind/Psionic)",
];

pub const TRAITS_POSITIVE: &[&str] = &[
    "Curious", "Patient", "Honest", "Brave", "Kind", "Optimistic", "Logical", "Empathetic",
    "Resourceful", "Disciplined", "Humorous", "Adaptable", "Loyal", "Generous", "Wise",
];

pub const TRAITS_NEGATIVE: &[&str] = &[
    "Impatient", "Deceitful", "Cowardly", "Cruel", "Pessimistic", "Irrational", "Apathetic",
    "Stubborn", "Lazy", "Grumpy", "Rigid", "Suspicious", "Greedy", "Arrogant", "Naive",
];

pub const TRAITS_QUIRKS: &[&str] = &[
    "Formal", "Informal", "Quiet", "Talkative", "Serious", "Playful", "Cautious", "Impulsive",
    "Methodical", "Disorganized", "Skeptical", "Idealistic", "Stoic", "Emotional",
    "Collects strange objects", "Has an unusual pet/symbiote", "Speaks in metaphors",
    "Obsessed with minor details", "Prone to sudden insights", "Always fiddling with something",
    "Has a distinctive vocal tic", "Never makes eye contact (or species equivalent)",
    "Fascinated by specific alien concepts (e.g., human music, weather)", "Slightly paranoid",
];

// ============================================================================
// CULTURE
// ============================================================================

pub const LANGUAGE_STRUCTURES: &[&str] = &[
    "Agglutinative",
    "Isolating",
    "Fusional/Inflectional",
    "Polysynthetic",
    "Oligosynthetic",
];

pub const PHONOLOGY_NOTES: &[&str] = &[
    "Rich in clicks and sibilants, limited vowel range.",
    "Melodic with complex tonal patterns.",
    "Harsh, guttural sounds with many fricatives.",
    "Uses sub-vocalized rumbles and high-frequency whistles.",
    "Incorporates percussive elements made with appendages.",
    "Syntax heavily reliant on scent-markers accompanying vocalizations.",
    "No written form; relies on oral tradition and complex memory aids.",
];

pub const COMMUNICATION_METHODS: &[&str] = &[
    "Vocalizations (speech, song, calls)",
    "Gestural language (e.g., using limbs, tentacles, antennae)",
    "Pheromonal signals",
    "Bioluminescent patterns/color shifts",
    "Telepathic exchange (if trait present)",
    "Tactile communication (touch-based)",
    "Complex percussive signals (e.g., drumming, tapping)",
];

pub const GOVERNMENT_TYPES: &[Weighted<&str>] = &[
    w("Direct Democracy", 5),
    w("Representative Republic", 7),
    w("Constitutional Monarchy", 4),
    w("Absolute Monarchy/Despotism", 3),
    w("Oligarchy (Council of Elders/Wealthy/Military)", 6),
    w("Theocracy", 5),
    w("Technocracy/Meritocracy", 6),
    w("Anarcho-Syndicalist Commune", 2),
    w("Hive Mind Collective (Centralized or Decentralized)", 3),
    w("Corporate Hegemony/Plutocracy", 4),
    w("Feudal System", 2),
    w("Magocracy (Ruled by magic/psionic users)", 1),
];

pub const POWER_STRUCTURES: &[&str] = &[
    "A council of elected representatives.",
    "A hereditary monarch with advisory bodies.",
    "A ruling priestly caste interpreting divine will.",
    "A small group of powerful families or corporations.",
    "Decisions made by those with proven expertise or contribution.",
    "No formal leaders; consensus through local assemblies.",
    "A single, all-powerful AI or collective intelligence.",
    "Warlords controlling distinct territories.",
];

pub const CITIZEN_RIGHTS: &[&str] = &[
    "Universal suffrage and extensive personal freedoms.",
    "Rights tied to social status or lineage.",
    "Strict adherence to religious law defines rights.",
    "Few individual rights; emphasis on collective duty.",
    "Rights earned through service or achievement.",
    "Complete individual autonomy, minimal societal obligations.",
];

pub const ECONOMIC_SYSTEMS: &[Weighted<&str>] = &[
    w("Market Capitalism (Regulated or Laissez-faire)", 6),
    w("State-Controlled Socialism/Communism", 4),
    w("Barter-based system (no formal currency)", 3),
    w("Gift Economy (status through giving)", 2),
    w("Resource-based (direct allocation, post-scarcity for essentials)", 5),
    w("Guild-based Craftsmanship", 3),
    w("Information/Data as primary commodity", 2),
];

pub const CURRENCIES: &[&str] = &[
    "Energy Credits", "Standardized Data Units", "Bio-Tokens", "Precious Metals/Gems",
    "Favors/Reputation Score", "No formal currency", "Merit-Units",
];

pub const KEY_INDUSTRIES: &[&str] = &[
    "Asteroid Mining", "Information Brokerage", "Bio-Engineering", "Luxury Goods Crafting",
    "Energy Production (e.g., geothermal, fusion, Dyson swarm)", "Terraforming",
    "Xeno-Archaeology", "Philosophical Discourse Services", "Artistic Holography",
];

pub const BELIEF_NAMES: &[&str] = &[
    "The Cosmic Weave", "Ancestral Echoes", "The Great Filter Cult", "Path of a Thousand Cycles",
    "The Void Singers", "Unity of Form", "The Architects' Legacy", "Cult of the Machine Spirit",
    "The Celestial Gardeners", "The Eternal Recurrence",
];

pub const CORE_TENETS: &[&str] = &[
    "Belief in universal interconnectedness and reincarnation.",
    "Reverence for ancestors and ancient traditions.",
    "Conviction that all civilizations face existential tests.",
    "Focus on achieving perfect societal harmony.",
    "Worship of a cosmic entity or pantheon of gods.",
    "Pursuit of pure logic and eradication of emotion.",
    "Belief that reality is a simulation.",
    "Devotion to preserving all knowledge.",
    "Emphasis on individual enlightenment through asceticism.",
    "Sacred duty to explore and understand the cosmos.",
];

pub const RITUALS: &[&str] = &[
    "Daily meditative communion with nature/planet.",
    "Elaborate ancestor veneration ceremonies.",
    "Ritualistic combat or tests of skill.",
    "Mass pilgrimages to sacred sites.",
    "Complex astrological divination.",
    "Technological augmentation as a spiritual pursuit.",
    "Collective dream-sharing or psionic linking.",
    "Sacred consumption of psychoactive flora/fauna.",
];

pub const TECHNOLOGY_LEVELS: &[Weighted<&str>] = &[
    w("Pre-Industrial (Stone/Bronze/Iron Age equivalent)", 1),
    w("Early Industrial (Steam power, basic machinery)", 2),
    w("Industrial Age (Mass production, electricity)", 3),
    w("Information Age (Computers, global networks)", 5),
    w("Early Spacefaring (Planetary colonization, basic interplanetary travel)", 7),
    w("Interstellar (FTL capability, widespread star system colonization)", 6),
    w("Advanced Interstellar (Large-scale astro-engineering, energy mastery)", 4),
    w("Transcendent/Post-Biological (Difficult to comprehend, may involve energy beings, digital consciousness)", 1),
];

pub const SOCIAL_STRUCTURES: &[Weighted<&str>] = &[
    w("Egalitarian (minimal hierarchy, emphasis on equality)", 5),
    w("Hierarchical (clear ranks and social strata)", 7),
    w("Caste-based (rigid social divisions determined by birth)", 3),
    w("Clan-based/Tribal (loyalty to kinship groups)", 4),
    w("Meritocratic (status based on achievement/skill)", 6),
    w("Age-graded (status and roles determined by age group)", 2),
    w("Gender-defined roles (can be matriarchal, patriarchal, or other)", 3),
];

pub const ART_EXPRESSIONS: &[&str] = &[
    "Elaborate body painting and modification.",
    "Complex, polyphonic musical traditions.",
    "Monumental architecture and sculpture.",
    "Oral storytelling and epic poetry.",
    "Holographic light shows and immersive virtual realities.",
    "Kinetic sculptures powered by natural forces.",
    "Genetically engineered bioluminescent flora art.",
    "Abstract mathematical or data-driven art.",
    "Ritualistic dance and performance art.",
    "Scent-based art forms (olfactory compositions).",
];

// ============================================================================
// INTERACTION
// ============================================================================

pub const DISPOSITIONS: &[Weighted<&str>] = &[
    w("Cautious and wary", 7),
    w("Curious and inquisitive", 8),
    w("Aggressive and territorial", 3),
    w("Fearful and skittish", 4),
    w("Welcoming and friendly", 5),
    w("Indifferent and aloof", 6),
    w("Analytical and detached", 7),
    w("Playful and mischievous", 2),
    w("Reverent and awestruck (by spacefarers)", 1),
    w("Condescending and arrogant", 3),
];

pub const COMMUNICATION_STYLES: &[&str] = &[
    "Literal and direct, struggles with idioms.",
    "Poetic and metaphorical, speaks in riddles.",
    "Highly logical and precise, uses technical terms.",
    "Emotive and expressive, uses many gestures/tones.",
    "Formal and ritualistic, follows strict protocols.",
    "Silent, communicates primarily through telepathy/non-verbal means.",
    "Uses a complex series of clicks, whistles, and chirps.",
    "Speaks in a monotone, emotionless voice.",
    "Constantly asks questions, eager to learn.",
    "Often pauses for long periods before responding.",
];

pub const MOTIVATIONS: &[&str] = &[
    "Survival and Procreation", "Acquisition of Knowledge", "Territorial Expansion",
    "Spiritual Enlightenment", "Technological Advancement", "Trade and Resource Acquisition",
    "Artistic Expression and Creation", "Maintaining Cultural Purity", "Exploring the Unknown",
    "Seeking Allies", "Escaping a Dying World/System", "Fulfilling an Ancient Prophecy",
    "Understanding their place in the cosmos", "Protecting their homeworld at all costs",
];
