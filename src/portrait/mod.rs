//! Procedural pixel-art portraits.
//!
//! A portrait is painted in passes over an owned [`PixelGrid`] of paint
//! codes: silhouette, limbs, head ornaments, face, then skin accents. Colors
//! are only resolved at raster time, from a palette derived up front. Each
//! drawing pass returns a `Result`; a failing pass is rolled back, logged
//! and recorded in the [`AnatomyReport`] while the rest of the portrait
//! still renders. The public entry points never fail: invalid descriptors
//! produce a labeled placeholder image instead.

pub mod accents;
pub mod archetype;
pub mod face;
pub mod features;
pub mod grid;
pub mod limbs;
pub mod palette;
pub mod raster;
pub mod silhouette;

use std::fmt;

use image::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::descriptor::{
    mentions_characteristic, portrait_input, DescriptorError, PlanetDescriptor, PortraitInput, SpeciesDescriptor,
};

pub use accents::AccentReport;
pub use archetype::BodyArchetype;
pub use face::FaceReport;
pub use features::FeatureReport;
pub use grid::{PaintCode, PixelGrid};
pub use limbs::LimbReport;
pub use palette::Palette;
pub use raster::{ArtifactKind, PortraitArtifact};
pub use silhouette::Silhouette;

/// Smallest canvas edge the passes can lay a body out on.
pub const MIN_CANVAS: usize = 16;

#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("invalid geometry: {0}")]
    Geometry(String),
    #[error("palette derivation failed: {0}")]
    Palette(String),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortraitConfig {
    pub width: usize,
    pub height: usize,
    /// Integer upscale applied when exporting to disk.
    pub scale: u32,
    /// Fill color used when no pixel was painted.
    pub debug_fill: [u8; 3],
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            scale: 1,
            debug_fill: [0, 0, 128],
        }
    }
}

impl PortraitConfig {
    pub fn canvas(&self) -> (usize, usize) {
        (self.width.max(MIN_CANVAS), self.height.max(MIN_CANVAS))
    }
}

/// The lowercased descriptor text every pass matches keywords against.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Traits {
    body: String,
    skin: String,
    appendages: String,
    head: String,
    archetype: BodyArchetype,
    bioluminescent: bool,
    armored: bool,
    temperature: f64,
}

impl Traits {
    pub(crate) fn from_text(
        body: &str,
        skin: &str,
        appendages: &str,
        head: &str,
        characteristics: &[&str],
        temperature: f64,
    ) -> Self {
        let has = |needle: &str| mentions_characteristic(characteristics.iter().copied(), needle);
        Self {
            body: body.to_lowercase(),
            skin: skin.to_lowercase(),
            appendages: appendages.to_lowercase(),
            head: head.to_lowercase(),
            archetype: BodyArchetype::from_body_type(body),
            bioluminescent: has("bioluminescen"),
            armored: has("natural armor") || has("naturally armored"),
            temperature,
        }
    }

    pub(crate) fn from_input(input: &PortraitInput<'_>) -> Self {
        let names: Vec<&str> = input
            .special_characteristics
            .iter()
            .map(|c| c.characteristic.as_str())
            .collect();
        Self::from_text(
            input.body_type,
            input.skin_texture,
            input.appendages,
            input.head_features,
            &names,
            input.average_temperature,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Pass {
    Silhouette,
    Limbs,
    Features,
    Face,
    Accents,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pass::Silhouette => "silhouette",
            Pass::Limbs => "limbs",
            Pass::Features => "features",
            Pass::Face => "face",
            Pass::Accents => "accents",
        };
        f.write_str(name)
    }
}

/// What each pass actually drew.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnatomyReport {
    pub archetype: BodyArchetype,
    pub head_height: i32,
    pub limbs: LimbReport,
    pub features: FeatureReport,
    pub face: FaceReport,
    pub accents: AccentReport,
    pub skipped_passes: Vec<Pass>,
    pub palette_fallback: bool,
}

/// A painted but not yet encoded portrait.
#[derive(Clone, Debug)]
pub struct Portrait {
    pub grid: PixelGrid,
    pub palette: Palette,
    pub silhouette: Option<Silhouette>,
    pub report: AnatomyReport,
}

impl Portrait {
    /// Rasterize and encode. Never fails: an empty grid becomes a debug fill
    /// and an encoder error becomes a placeholder.
    pub fn to_artifact(&self, config: &PortraitConfig) -> PortraitArtifact {
        let (width, height) = (self.grid.width as u32, self.grid.height as u32);
        let (mut img, painted) = raster::render(&self.grid, &self.palette);
        let kind = if painted == 0 {
            tracing::warn!("no pixels painted, filling with debug color");
            for pixel in img.pixels_mut() {
                *pixel = Rgb(config.debug_fill);
            }
            ArtifactKind::DebugFill
        } else {
            ArtifactKind::Portrait
        };

        match raster::encode_png(&img) {
            Ok(png) => PortraitArtifact {
                png,
                width,
                height,
                kind,
            },
            Err(err) => {
                tracing::warn!("portrait encoding failed: {}", err);
                raster::placeholder("ENCODE", width, height)
            }
        }
    }
}

/// Run one drawing pass. On failure the grid is restored to its state
/// before the pass and the pass is recorded as skipped.
fn run_pass<T: Default>(
    grid: &mut PixelGrid,
    pass: Pass,
    skipped: &mut Vec<Pass>,
    draw: impl FnOnce(&mut PixelGrid) -> Result<T, PortraitError>,
) -> T {
    let snapshot = grid.clone();
    match draw(grid) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%pass, "drawing pass failed, skipping: {}", err);
            *grid = snapshot;
            skipped.push(pass);
            T::default()
        }
    }
}

/// Validate the descriptors and paint a portrait without encoding it.
pub fn sketch_portrait<R: Rng + ?Sized>(
    species: &SpeciesDescriptor,
    planet: &PlanetDescriptor,
    config: &PortraitConfig,
    rng: &mut R,
) -> Result<Portrait, DescriptorError> {
    let input = portrait_input(species, planet)?;
    let traits = Traits::from_input(&input);
    let (width, height) = config.canvas();
    let mut grid = PixelGrid::new(width, height);
    let mut report = AnatomyReport {
        archetype: traits.archetype,
        ..AnatomyReport::default()
    };

    let palette = match palette::derive(&traits, rng) {
        Ok(palette) => palette,
        Err(err) => {
            tracing::warn!("{}, using fallback palette", err);
            report.palette_fallback = true;
            Palette::fallback()
        }
    };

    let headless = traits.head.contains("no distinct head");
    let silhouette = run_pass(&mut grid, Pass::Silhouette, &mut report.skipped_passes, |g| {
        let bounds = Silhouette::layout(width, height, traits.archetype, headless, rng);
        let sil = Silhouette::build(g, bounds, traits.archetype, rng);
        sil.validate()?;
        Ok(Some(sil))
    });

    if let Some(sil) = &silhouette {
        report.head_height = sil.bounds.head_height;
        let skipped = &mut report.skipped_passes;
        report.limbs = run_pass(&mut grid, Pass::Limbs, skipped, |g| limbs::attach(g, sil, &traits, rng));
        report.features = run_pass(&mut grid, Pass::Features, skipped, |g| features::add(g, sil, &traits, rng));
        report.face = run_pass(&mut grid, Pass::Face, skipped, |g| face::add(g, sil, &traits, rng));
    }
    report.accents = run_pass(&mut grid, Pass::Accents, &mut report.skipped_passes, |g| {
        accents::paint(g, &traits, rng)
    });

    tracing::debug!(
        archetype = %report.archetype,
        painted = grid.painted_count(),
        skipped = report.skipped_passes.len(),
        "portrait sketched"
    );

    Ok(Portrait {
        grid,
        palette,
        silhouette,
        report,
    })
}

/// Generate a portrait with an explicit configuration and random source.
pub fn generate_portrait_with<R: Rng + ?Sized>(
    species: &SpeciesDescriptor,
    planet: &PlanetDescriptor,
    config: &PortraitConfig,
    rng: &mut R,
) -> PortraitArtifact {
    match sketch_portrait(species, planet, config, rng) {
        Ok(portrait) => portrait.to_artifact(config),
        Err(err) => {
            tracing::warn!("cannot draw portrait: {}", err);
            let (width, height) = config.canvas();
            raster::placeholder(err.label(), width as u32, height as u32)
        }
    }
}

/// Generate a portrait with the default configuration and the thread-local
/// random source. Repeated calls for one species give different portraits.
pub fn generate_portrait(species: &SpeciesDescriptor, planet: &PlanetDescriptor) -> PortraitArtifact {
    generate_portrait_with(species, planet, &PortraitConfig::default(), &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::tests::species;
    use crate::descriptor::SpecialCharacteristic;
    use limbs::LimbBand;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn planet() -> PlanetDescriptor {
        PlanetDescriptor::with_temperature(20.0)
    }

    #[test]
    fn test_fixed_canvas_size() {
        let s = species("Avian", "Iridescent feathers", "4 limbs (types: wings, legs)", "crested head");
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let artifact = generate_portrait_with(&s, &planet(), &PortraitConfig::default(), &mut rng);
            assert_eq!((artifact.width, artifact.height), (64, 64));
            assert_eq!(artifact.kind, ArtifactKind::Portrait);
            assert_eq!(artifact.decode().expect("png").dimensions(), (64, 64));
        }
    }

    #[test]
    fn test_tiny_canvas_is_clamped() {
        let config = PortraitConfig {
            width: 4,
            height: 0,
            ..PortraitConfig::default()
        };
        assert_eq!(config.canvas(), (MIN_CANVAS, MIN_CANVAS));
        let s = species("Humanoid", "Fine, dense fur", "4 limbs", "horns");
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let artifact = generate_portrait_with(&s, &planet(), &config, &mut rng);
        assert_eq!((artifact.width, artifact.height), (16, 16));
    }

    #[test]
    fn test_missing_physical_gives_placeholder() {
        let mut s = species("Humanoid", "Fine, dense fur", "4 limbs", "horns");
        s.physical = None;
        let artifact = generate_portrait(&s, &planet());
        assert_eq!(
            artifact.kind,
            ArtifactKind::Placeholder {
                label: "CORE DATA".to_string()
            }
        );
        assert_eq!(artifact.decode().expect("png").dimensions(), (64, 64));

        let artifact = generate_portrait(&SpeciesDescriptor::default(), &planet());
        assert!(artifact.is_placeholder());
    }

    #[test]
    fn test_same_seed_same_png() {
        let s = species("Reptilian", "Overlapping scales (reptilian)", "4 limbs", "horns");
        let a = generate_portrait_with(&s, &planet(), &PortraitConfig::default(), &mut ChaCha8Rng::seed_from_u64(99));
        let b = generate_portrait_with(&s, &planet(), &PortraitConfig::default(), &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a.png, b.png);
    }

    #[test]
    fn test_insectoid_scenario() {
        let s = species("Insectoid", "Chitinous plates", "6 limbs (types: jointed legs)", "antennae");
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let portrait = sketch_portrait(&s, &planet(), &PortraitConfig::default(), &mut rng).expect("valid");
            let r = &portrait.report;
            assert_eq!(r.archetype, BodyArchetype::Insectoid);
            assert!(portrait.grid.count(PaintCode::Body) > 0);
            assert_eq!(r.limbs.plan.pairs(), 3);
            assert_eq!(r.limbs.strokes.len(), 6, "seed {seed}");
            assert!(r.features.antenna_pairs() >= 1);
            assert_eq!(r.limbs.count(LimbBand::Wing), 0);
            assert!(!r.limbs.fins.any());
            assert!(r.skipped_passes.is_empty());
        }
    }

    #[test]
    fn test_eyeless_limbless() {
        let s = species("Humanoid", "Smooth, leathery skin", "no distinct limbs", "no visible eyes");
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let portrait = sketch_portrait(&s, &planet(), &PortraitConfig::default(), &mut rng).expect("valid");
            assert_eq!(portrait.grid.count(PaintCode::Eye), 0);
            assert_eq!(portrait.grid.count(PaintCode::Limb), 0);
            assert!(portrait.grid.count(PaintCode::Body) > 0);
        }
    }

    #[test]
    fn test_nan_temperature_uses_fallback_palette() {
        let s = species("Humanoid", "Fine, dense fur", "4 limbs", "horns");
        let p = PlanetDescriptor::with_temperature(f64::NAN);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let portrait = sketch_portrait(&s, &p, &PortraitConfig::default(), &mut rng).expect("valid");
        assert!(portrait.report.palette_fallback);
        assert_eq!(portrait.palette, Palette::fallback());
    }

    #[test]
    fn test_failing_pass_is_rolled_back() {
        let mut grid = PixelGrid::new(16, 16);
        grid.set(1, 1, PaintCode::Body);
        let before = grid.clone();
        let mut skipped = Vec::new();
        let value: u32 = run_pass(&mut grid, Pass::Face, &mut skipped, |g| {
            g.set(2, 2, PaintCode::Eye);
            Err(PortraitError::Geometry("broken".to_string()))
        });
        assert_eq!(value, 0);
        assert_eq!(grid, before);
        assert_eq!(skipped, vec![Pass::Face]);
    }

    #[test]
    fn test_empty_grid_gets_debug_fill() {
        let portrait = Portrait {
            grid: PixelGrid::new(16, 16),
            palette: Palette::fallback(),
            silhouette: None,
            report: AnatomyReport::default(),
        };
        let config = PortraitConfig::default();
        let artifact = portrait.to_artifact(&config);
        assert_eq!(artifact.kind, ArtifactKind::DebugFill);
        let img = artifact.decode().expect("png");
        assert_eq!(*img.get_pixel(8, 8), Rgb(config.debug_fill));
    }

    #[test]
    fn test_characteristic_flags() {
        let input_traits = Traits::from_text(
            "Humanoid",
            "Fur",
            "4 limbs",
            "horns",
            &["Naturally Armored", "Bioluminescent Patterns"],
            10.0,
        );
        assert!(input_traits.armored);
        assert!(input_traits.bioluminescent);

        let mut s = species("Humanoid", "Fur", "4 limbs", "horns");
        s.special_characteristics = Some(vec![SpecialCharacteristic {
            characteristic: "Natural Armor".to_string(),
            details: String::new(),
            tag: "[SPECIAL_CHAR_1_TAG]".to_string(),
        }]);
        let planet = planet();
        let input = portrait_input(&s, &planet).expect("valid");
        assert!(Traits::from_input(&input).armored);
    }
}
