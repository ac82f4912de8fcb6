//! Skin patterning and bioluminescent glow.

use rand::Rng;
use serde::Serialize;

use super::grid::{PaintCode, PixelGrid};
use super::{PortraitError, Traits};
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccentReport {
    pub accents: usize,
    pub glow: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    Scales,
    Grid { every: i32 },
    Facets,
    Fur,
    Plant,
    Speckle,
}

impl Pattern {
    fn pick<R: Rng + ?Sized>(traits: &Traits, rng: &mut R) -> Self {
        let skin = traits.skin.as_str();
        let body = traits.body.as_str();
        if skin.contains("scale") {
            Pattern::Scales
        } else if skin.contains("chitin") || skin.contains("exoskeleton") || body.contains("insectoid") {
            Pattern::Grid { every: rng.int(8, 14) }
        } else if body.contains("crystalline") || body.contains("mineral-based") {
            Pattern::Facets
        } else if skin.contains("fur") {
            Pattern::Fur
        } else if body.contains("plant-like") || body.contains("fungoid") {
            Pattern::Plant
        } else {
            Pattern::Speckle
        }
    }

    fn hits<R: Rng + ?Sized>(self, x: i32, y: i32, rng: &mut R) -> bool {
        match self {
            Pattern::Scales => (2 * x + 3 * y) % 9 < 2,
            Pattern::Grid { every } => (y % every <= 1 || x % every <= 1) && rng.chance(0.08),
            Pattern::Facets => {
                rng.chance(0.08) && ((3 * x + 2 * y) % 13 < 2 || (2 * x - 3 * y).rem_euclid(11) < 2)
            }
            Pattern::Fur => rng.chance(0.04),
            Pattern::Plant => rng.chance(0.06),
            Pattern::Speckle => rng.chance(0.015),
        }
    }
}

fn density(traits: &Traits) -> f64 {
    let skin = traits.skin.as_str();
    let body = traits.body.as_str();
    if skin.contains("patterned") || traits.bioluminescent {
        0.06
    } else if skin.contains("scale") {
        0.05
    } else if skin.contains("chitin") || skin.contains("exoskeleton") {
        0.04
    } else if body.contains("crystalline") || body.contains("mineral-based") {
        0.07
    } else if body.contains("plant-like") || body.contains("fungoid") {
        0.05
    } else if skin.contains("fur") {
        0.025
    } else {
        0.01
    }
}

fn touches_face(grid: &PixelGrid, x: i32, y: i32) -> bool {
    grid.neighbors8(x, y)
        .any(|n| n.map_or(false, PaintCode::is_facial))
}

/// Paint accents onto skin cells. Cells next to eyes or mouth are left alone
/// so facial features keep a clean outline.
pub(crate) fn paint<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    traits: &Traits,
    rng: &mut R,
) -> Result<AccentReport, PortraitError> {
    let mut report = AccentReport::default();
    let pattern = Pattern::pick(traits, rng);
    let p = density(traits);

    let cells: Vec<(i32, i32, PaintCode)> = grid.iter().filter(|(_, _, c)| c.is_skin()).collect();
    for (x, y, code) in cells {
        if !rng.chance(p) {
            continue;
        }
        let chosen = if rng.chance(0.6) {
            PaintCode::Accent1
        } else {
            PaintCode::Accent2
        };
        if code == PaintCode::Body {
            let empty = grid
                .neighbors8(x, y)
                .filter(|n| !n.map_or(false, PaintCode::is_painted))
                .count();
            if empty > 5 {
                continue;
            }
        }
        if touches_face(grid, x, y) {
            continue;
        }
        if pattern.hits(x, y, rng) {
            grid.set(x, y, chosen);
            report.accents += 1;
        }
    }

    if traits.bioluminescent {
        let cells: Vec<(i32, i32)> = grid
            .iter()
            .filter(|(_, _, c)| c.is_skin() || c.is_accent())
            .map(|(x, y, _)| (x, y))
            .collect();
        for (x, y) in cells {
            if rng.chance(0.0025) && !touches_face(grid, x, y) {
                let glow = if rng.chance(0.5) {
                    PaintCode::Accent1
                } else {
                    PaintCode::Accent2
                };
                grid.set(x, y, glow);
                report.glow += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn blob(grid: &mut PixelGrid) {
        for y in 8..56 {
            for x in 12..52 {
                grid.set(x, y, PaintCode::Body);
            }
        }
        for x in 26..30 {
            grid.set(x, 20, PaintCode::Eye);
        }
        for x in 28..36 {
            grid.set(x, 30, PaintCode::Feature);
        }
    }

    #[test]
    fn test_accents_avoid_facial_neighbours() {
        for seed in 0..10 {
            let traits = Traits::from_text(
                "Reptilian",
                "Overlapping scales (reptilian)",
                "4 limbs",
                "horns",
                &["Bioluminescence"],
                20.0,
            );
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut grid = PixelGrid::new(64, 64);
            blob(&mut grid);
            let report = paint(&mut grid, &traits, &mut rng).expect("accents");
            assert!(report.accents > 0);
            for (x, y, code) in grid.iter() {
                if code.is_accent() {
                    assert!(!touches_face(&grid, x, y), "accent at {},{}", x, y);
                }
            }
        }
    }

    #[test]
    fn test_only_skin_is_recolored() {
        let traits = Traits::from_text("Insectoid", "Chitinous plates", "6 limbs", "antennae", &[], 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = PixelGrid::new(64, 64);
        blob(&mut grid);
        let before = grid.clone();
        paint(&mut grid, &traits, &mut rng).expect("accents");
        assert_eq!(grid.count(PaintCode::Eye), 4);
        assert_eq!(grid.count(PaintCode::Feature), 8);
        for ((_, _, old), (_, _, new)) in before.iter().zip(grid.iter()) {
            if old != new {
                assert!(old.is_skin() && new.is_accent());
            }
        }
    }

    #[test]
    fn test_no_glow_without_bioluminescence() {
        let traits = Traits::from_text("Humanoid", "Smooth, leathery skin", "4 limbs", "horns", &[], 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut grid = PixelGrid::new(64, 64);
        blob(&mut grid);
        let report = paint(&mut grid, &traits, &mut rng).expect("accents");
        assert_eq!(report.glow, 0);
    }
}
