use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use xeno_portrait::chat::{self, ChatClient, ChatConfig, Conversation};
use xeno_portrait::codex::Codex;
use xeno_portrait::descriptor::{PlanetDescriptor, PlanetGeneral, PlanetSurface, SpeciesDescriptor};
use xeno_portrait::portrait::raster::contact_sheet;
use xeno_portrait::portrait::{generate_portrait_with, PortraitConfig};
use xeno_portrait::seeds::ItemSeeds;
use xeno_portrait::species::generate_species;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "xeno_portrait")]
#[command(about = "Generate alien species, draw their portraits and talk to them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a species descriptor for a planet
    Species {
        #[command(flatten)]
        planet: PlanetArgs,

        /// Random seed (uses random seed if not specified)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Draw a portrait PNG
    Portrait {
        /// Species JSON (a fresh species is generated if omitted)
        #[arg(long)]
        species: Option<PathBuf>,

        #[command(flatten)]
        planet: PlanetArgs,

        #[command(flatten)]
        canvas: CanvasArgs,

        /// Random seed (uses random seed if not specified)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output PNG path
        #[arg(short, long, default_value = "portrait.png")]
        output: PathBuf,

        /// Also print the PNG as a data URI
        #[arg(long)]
        data_uri: bool,
    },
    /// Generate many species and portraits into a directory
    Gallery {
        /// Number of species
        #[arg(short = 'n', long, default_value = "12")]
        count: u64,

        #[command(flatten)]
        planet: PlanetArgs,

        #[command(flatten)]
        canvas: CanvasArgs,

        /// Master seed; every item derives its own seeds from it
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = "gallery")]
        output: PathBuf,

        /// Portraits per row on the contact sheet
        #[arg(long, default_value = "4")]
        columns: u32,
    },
    /// Talk to a member of a species
    Chat {
        /// Species JSON (a fresh species is generated if omitted)
        #[arg(long)]
        species: Option<PathBuf>,

        #[command(flatten)]
        planet: PlanetArgs,

        /// Random seed for a freshly generated species
        #[arg(short, long)]
        seed: Option<u64>,

        /// Gemini API key (defaults to $GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Codex file recording what was revealed
        #[arg(long, default_value = "codex.json")]
        codex: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PlanetArgs {
    /// Planet JSON descriptor (overrides the flags below)
    #[arg(long)]
    planet: Option<PathBuf>,

    /// Human designation of the planet
    #[arg(long, default_value = "Kepler-442b")]
    planet_name: String,

    /// Average surface temperature in °C
    #[arg(short, long, default_value = "15.0", allow_negative_numbers = true)]
    temperature: f64,

    /// Planet type, e.g. "Ocean Planet" or "Ice World"
    #[arg(long, default_value = "Terrestrial")]
    planet_type: String,

    /// Surface gravity in g
    #[arg(short, long, default_value = "1.0")]
    gravity: f64,
}

impl PlanetArgs {
    fn descriptor(&self) -> Result<PlanetDescriptor, Box<dyn Error>> {
        if let Some(path) = &self.planet {
            return read_json(path);
        }
        Ok(PlanetDescriptor {
            general: Some(PlanetGeneral {
                name: Some(self.planet_name.clone()),
                planet_type: Some(self.planet_type.clone()),
                gravity: Some(self.gravity),
            }),
            surface: Some(PlanetSurface {
                average_temperature: Some(self.temperature),
            }),
            atmosphere: None,
        })
    }
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Portrait width in cells
    #[arg(short = 'W', long, default_value = "64")]
    width: usize,

    /// Portrait height in cells
    #[arg(short = 'H', long, default_value = "64")]
    height: usize,

    /// Nearest-neighbour upscale factor for saved PNGs
    #[arg(long, default_value = "1")]
    scale: u32,
}

impl CanvasArgs {
    fn config(&self) -> PortraitConfig {
        PortraitConfig {
            width: self.width,
            height: self.height,
            scale: self.scale.max(1),
            ..PortraitConfig::default()
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))?)
}

fn seeded(seed: Option<u64>) -> (u64, ChaCha8Rng) {
    let seed = seed.unwrap_or_else(rand::random);
    (seed, ChaCha8Rng::seed_from_u64(seed))
}

/// Species from a file, or generated for the planet.
fn load_or_generate(
    path: Option<&Path>,
    planet: &PlanetDescriptor,
    rng: &mut ChaCha8Rng,
) -> Result<SpeciesDescriptor, Box<dyn Error>> {
    match path {
        Some(path) => read_json(path),
        None => Ok(generate_species(planet, rng)),
    }
}

fn run_species(planet: &PlanetArgs, seed: Option<u64>, output: Option<&Path>) -> CliResult {
    let planet = planet.descriptor()?;
    let (seed, mut rng) = seeded(seed);
    tracing::info!(seed, "generating species");
    let species = generate_species(&planet, &mut rng);
    let json = serde_json::to_string_pretty(&species)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_portrait(
    species: Option<&Path>,
    planet: &PlanetArgs,
    canvas: &CanvasArgs,
    seed: Option<u64>,
    output: &Path,
    data_uri: bool,
) -> CliResult {
    let planet = planet.descriptor()?;
    let (seed, mut rng) = seeded(seed);
    let species = load_or_generate(species, &planet, &mut rng)?;
    let config = canvas.config();

    let artifact = generate_portrait_with(&species, &planet, &config, &mut rng);
    if artifact.is_placeholder() {
        tracing::warn!(kind = ?artifact.kind, "drew a placeholder instead of a portrait");
    }
    artifact.save(output, config.scale)?;
    println!(
        "{} (seed {}) -> {}",
        species.display_name().unwrap_or_else(|| "unnamed".to_string()),
        seed,
        output.display()
    );
    if data_uri {
        println!("{}", artifact.data_uri());
    }
    Ok(())
}

fn run_gallery(
    count: u64,
    planet: &PlanetArgs,
    canvas: &CanvasArgs,
    seed: Option<u64>,
    output: &Path,
    columns: u32,
) -> CliResult {
    let planet = planet.descriptor()?;
    let master = seed.unwrap_or_else(rand::random);
    let config = canvas.config();
    fs::create_dir_all(output)?;
    tracing::info!(master, count, "generating gallery");

    let results: Vec<Result<(String, image::RgbImage), String>> = (0..count)
        .into_par_iter()
        .map(|index| {
            let seeds = ItemSeeds::for_item(master, index);
            let species = generate_species(&planet, &mut ChaCha8Rng::seed_from_u64(seeds.species));
            let name = species.display_name().unwrap_or_else(|| format!("species {index}"));
            let artifact = generate_portrait_with(
                &species,
                &planet,
                &config,
                &mut ChaCha8Rng::seed_from_u64(seeds.portrait),
            );
            tracing::debug!(%seeds, %name, "gallery item");

            let stem = output.join(format!("{:03}_{}", index, name.to_lowercase().replace(['\'', ' '], "_")));
            let json = serde_json::to_string_pretty(&species).map_err(|e| e.to_string())?;
            fs::write(stem.with_extension("json"), json).map_err(|e| e.to_string())?;
            artifact
                .save(stem.with_extension("png"), config.scale)
                .map_err(|e| e.to_string())?;
            let tile = artifact.decode().map_err(|e| e.to_string())?;
            Ok((name, tile))
        })
        .collect();

    let mut tiles = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(tile) => tiles.push(tile),
            Err(err) => tracing::warn!("gallery item failed: {}", err),
        }
    }

    let sheet = contact_sheet(&tiles, columns);
    let sheet = xeno_portrait::portrait::raster::upscale(&sheet, config.scale);
    let sheet_path = output.join("contact_sheet.png");
    sheet.save(&sheet_path)?;
    println!(
        "Wrote {} portraits (master seed {}) and {}",
        tiles.len(),
        master,
        sheet_path.display()
    );
    Ok(())
}

fn run_chat(
    species: Option<&Path>,
    planet: &PlanetArgs,
    seed: Option<u64>,
    api_key: Option<String>,
    model: Option<String>,
    codex_path: &Path,
) -> CliResult {
    let planet = planet.descriptor()?;
    let (_, mut rng) = seeded(seed);
    let species = load_or_generate(species, &planet, &mut rng)?;
    let species_name = species.display_name().unwrap_or_default();

    let mut config = ChatConfig::from_env();
    if api_key.is_some() {
        config.api_key = api_key;
    }
    if let Some(model) = model {
        config.model = model;
    }
    let client = ChatClient::new(config)?;

    let mut codex = Codex::load_or_default(codex_path)?;
    codex.contact(&species, &planet);
    let mut conversation = Conversation::new(chat::system_prompt(&planet, &species)?);

    println!("Contact established. Type a message, or /quit to leave.");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" {
            break;
        }

        match conversation.ask(&client, message) {
            Ok(reply) => {
                println!("{}", chat::strip_tags(&reply));
                let fresh = codex.record_reply(&species_name, &reply).unwrap_or_default();
                if !fresh.is_empty() {
                    tracing::info!(revealed = ?fresh, "codex updated");
                }
            }
            Err(err) => eprintln!("Error: {}", err),
        }
    }

    if let Some(entry) = codex.find(&species_name) {
        let summary = &entry.revealed_summary;
        println!(
            "Codex: {} of {} ({}, {}), {} facts revealed",
            summary.species_name,
            summary.homeworld_name,
            summary.body_type,
            summary.tech_level,
            entry.revealed_tags.len()
        );
    }
    codex.save(codex_path)?;
    Ok(())
}

fn run(cli: Cli) -> CliResult {
    match cli.command {
        Command::Species { planet, seed, output } => run_species(&planet, seed, output.as_deref()),
        Command::Portrait {
            species,
            planet,
            canvas,
            seed,
            output,
            data_uri,
        } => run_portrait(species.as_deref(), &planet, &canvas, seed, &output, data_uri),
        Command::Gallery {
            count,
            planet,
            canvas,
            seed,
            output,
            columns,
        } => run_gallery(count, &planet, &canvas, seed, &output, columns),
        Command::Chat {
            species,
            planet,
            seed,
            api_key,
            model,
            codex,
        } => run_chat(species.as_deref(), &planet, seed, api_key, model, &codex),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
