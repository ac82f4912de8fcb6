//! Head ornaments and armor plates.
//!
//! Horns, crests and spines grow up from the head top; antennae come in
//! pairs. Every pair shares one base direction and one splay magnitude, so
//! the left member is the exact mirror of the right. All ornaments paint
//! with [`PaintCode::LimbAccent`].

use std::f64::consts::PI;

use rand::Rng;
use serde::Serialize;

use super::grid::{PaintCode, PixelGrid};
use super::silhouette::{Side, Silhouette};
use super::{PortraitError, Traits};
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OrnamentKind {
    Horn,
    Antenna,
}

/// One drawn ornament. `angle == base_angle + splay * side.sign()`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ornament {
    pub kind: OrnamentKind,
    /// Pair index within its kind; the odd middle horn has `None`.
    pub pair: Option<usize>,
    pub side: Side,
    pub attach: (i32, i32),
    pub base_angle: f64,
    pub splay: f64,
    pub angle: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FeatureReport {
    pub ornaments: Vec<Ornament>,
    pub plates: u32,
}

impl FeatureReport {
    pub fn antenna_pairs(&self) -> usize {
        self.ornaments
            .iter()
            .filter(|o| o.kind == OrnamentKind::Antenna && o.side == Side::Right)
            .count()
    }
}

pub(crate) fn add<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    sil: &Silhouette,
    traits: &Traits,
    rng: &mut R,
) -> Result<FeatureReport, PortraitError> {
    sil.validate()?;
    let mut report = FeatureReport::default();
    let head = traits.head.as_str();

    if head.contains("horn") || head.contains("crest") || head.contains("spine") {
        horns(grid, sil, head, &mut report, rng);
    }
    if head.contains("antennae") {
        antennae(grid, sil, &mut report, rng);
    }

    let plated = traits.armored
        || traits.skin.contains("plates")
        || (traits.skin.contains("exoskeleton") && rng.chance(0.3));
    if plated {
        report.plates = plates(grid, sil, rng);
    }
    Ok(report)
}

fn horns<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    sil: &Silhouette,
    head: &str,
    report: &mut FeatureReport,
    rng: &mut R,
) {
    let b = sil.bounds;
    let count = if head.contains("crested") {
        rng.int(2, 7)
    } else {
        rng.int(1, 4)
    } as usize;
    let length_base = rng.int(3, 12) as f64;
    let thickness = if head.contains("spines") {
        rng.int(1, 2)
    } else {
        rng.int(1, 4)
    };
    let base_angle = -PI / 2.0 + rng.jitter(0.075);
    let splay = rng.float(0.1, 0.5);

    let pairs = count / 2;
    if count % 2 == 1 {
        let attach_y = b.y + (b.head_height as f64 * rng.float(-0.2, 0.25)).floor() as i32;
        if attach_y >= b.y - 2 {
            let x = sil.edge_x(attach_y, Side::Center).clamp(0, grid.width as i32 - 1);
            let angle = base_angle + rng.jitter(0.025);
            let length = length_base * rng.float(0.7, 1.3);
            grow_horn(grid, (x, attach_y), angle, length, thickness);
            report.ornaments.push(Ornament {
                kind: OrnamentKind::Horn,
                pair: None,
                side: Side::Center,
                attach: (x, attach_y),
                base_angle,
                splay: 0.0,
                angle,
            });
        }
    }

    for pair in 0..pairs {
        let attach_y = b.y + (b.head_height as f64 * rng.float(-0.2, 0.25)).floor() as i32;
        if attach_y < b.y - 2 {
            continue;
        }
        let length = length_base * rng.float(0.7, 1.3);
        let spread = (sil.width_at(attach_y) as f64 * (0.1 + pair as f64 * 0.12)).floor() as i32;
        let center = sil.edge_x(attach_y, Side::Center);
        for side in Side::PAIR {
            let x = (center + spread * side.sign()).clamp(0, grid.width as i32 - 1);
            let angle = base_angle + splay * side.signf();
            grow_horn(grid, (x, attach_y), angle, length, thickness);
            report.ornaments.push(Ornament {
                kind: OrnamentKind::Horn,
                pair: Some(pair),
                side,
                attach: (x, attach_y),
                base_angle,
                splay,
                angle,
            });
        }
    }
}

/// Step outward one pixel at a time, thinning towards the tip.
fn grow_horn(grid: &mut PixelGrid, start: (i32, i32), angle: f64, length: f64, thickness: i32) {
    let gw = grid.width as i32;
    let (mut x, mut y) = start;
    let step = (
        (angle.cos() * 1.1).round() as i32,
        (angle.sin() * 1.1).round() as i32,
    );
    let mut l = 0.0;
    while l < length {
        let taper = (l / (length / thickness as f64 + 0.1)).floor() as i32;
        let next = (x + step.0, y + step.1);
        grid.draw_line((x, y), next, PaintCode::LimbAccent, (thickness - taper).max(1), true);
        (x, y) = next;
        if y < -3 || x < -3 || x > gw + 2 {
            break;
        }
        l += 1.0;
    }
}

fn antennae<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    sil: &Silhouette,
    report: &mut FeatureReport,
    rng: &mut R,
) {
    let b = sil.bounds;
    let gw = grid.width as i32;
    let length_base = rng.int(8, 20) as f64;
    let thickness = rng.int(1, 2);
    let pairs = rng.int(1, 2) as usize;
    let base_angle = -PI / 2.0 + rng.jitter(0.1);
    let splay = PI / 5.0 + rng.jitter(PI / 16.0);

    for pair in 0..pairs {
        // Clamped to the head top so a pair is never dropped.
        let rel = rng.float(-0.1, 0.35) + pair as f64 * 0.1;
        let attach_y = (b.y + (b.head_height as f64 * rel).floor() as i32).max(b.y);
        let length = length_base * rng.float(0.8, 1.2);

        for side in Side::PAIR {
            let s = side.signf();
            let angle = base_angle + splay * s;
            let start = (sil.edge_x(attach_y, side) + side.sign() * (thickness / 2), attach_y);
            let (mut x, mut y) = start;
            let steps = length.floor() as i32;

            for l in 0..steps {
                let wave = (l as f64 * 0.15 + pair as f64 * 0.5).sin() * 0.4 * s;
                let heading = angle + wave;
                let next = (
                    x + (heading.cos() * 1.5).round() as i32,
                    y + (heading.sin() * 1.5).round() as i32,
                );
                grid.draw_line((x, y), next, PaintCode::LimbAccent, thickness, true);
                (x, y) = next;
                if l == steps - 1 && rng.chance(0.7) {
                    bulb(grid, (x, y), rng.int(1, thickness + 1));
                }
                if y < -4 || x < -4 || x >= gw + 4 {
                    break;
                }
            }

            report.ornaments.push(Ornament {
                kind: OrnamentKind::Antenna,
                pair: Some(pair),
                side,
                attach: start,
                base_angle,
                splay,
                angle,
            });
        }
    }
}

fn bulb(grid: &mut PixelGrid, (cx, cy): (i32, i32), size: i32) {
    let lo = -((size - 1) / 2);
    let hi = size / 2;
    for dy in lo..=hi {
        for dx in lo..=hi {
            grid.set_if(cx + dx, cy + dy, PaintCode::LimbAccent, |c| c == PaintCode::Empty);
        }
    }
}

/// Scatter rectangular plates over painted cells near the body edge.
fn plates<R: Rng + ?Sized>(grid: &mut PixelGrid, sil: &Silhouette, rng: &mut R) -> u32 {
    let b = sil.bounds;
    let mut placed = 0;

    for _ in 0..rng.int(2, 8) {
        let y = b.y + rng.int(b.head_height / 2, b.height - 3);
        if y >= b.bottom() || y < b.y {
            continue;
        }
        let side = if rng.chance(0.5) { Side::Left } else { Side::Right };
        let x = sil.edge_x(y, side) + side.sign() * rng.int(-1, 2);
        let (w, h) = (rng.int(2, 7), rng.int(2, 6));

        if !grid.code_at(x, y).is_painted() {
            continue;
        }
        for py in 0..h {
            for px in 0..w {
                let (cx, cy) = (x + px - w / 2, y + py - h / 2);
                if grid.code_at(cx, cy).is_painted() && rng.chance(0.75) {
                    grid.set(cx, cy, PaintCode::LimbAccent);
                }
            }
        }
        placed += 1;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(head: &str, skin: &str, seed: u64) -> (PixelGrid, FeatureReport) {
        let traits = Traits::from_text("Humanoid", skin, "4 limbs", head, &[], 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = PixelGrid::new(64, 64);
        let bounds = Silhouette::layout(64, 64, traits.archetype, false, &mut rng);
        let sil = Silhouette::build(&mut grid, bounds, traits.archetype, &mut rng);
        let report = add(&mut grid, &sil, &traits, &mut rng).expect("features");
        (grid, report)
    }

    fn assert_mirrored(report: &FeatureReport, kind: OrnamentKind) {
        let of_kind: Vec<_> = report.ornaments.iter().filter(|o| o.kind == kind).collect();
        for right in of_kind.iter().filter(|o| o.side == Side::Right) {
            let left = of_kind
                .iter()
                .find(|o| o.side == Side::Left && o.pair == right.pair)
                .expect("every right ornament has a left partner");
            assert_eq!(left.splay, right.splay);
            assert_eq!(left.base_angle, right.base_angle);
            assert_eq!(left.attach.1, right.attach.1);
            let (dl, dr) = (left.angle - left.base_angle, right.angle - right.base_angle);
            assert!((dl + dr).abs() < 1e-12, "{} vs {}", dl, dr);
            assert!(dr > 0.0);
        }
    }

    #[test]
    fn test_antenna_pairs_are_mirrored() {
        for seed in 0..40 {
            let (grid, report) = run("antennae", "Smooth, leathery skin", seed);
            let pairs = report.antenna_pairs();
            assert!((1..=2).contains(&pairs));
            assert_eq!(report.ornaments.len(), pairs * 2);
            assert_mirrored(&report, OrnamentKind::Antenna);
            assert!(grid.count(PaintCode::LimbAccent) > 0);
        }
    }

    #[test]
    fn test_horn_pairs_are_mirrored() {
        for seed in 0..40 {
            let (_, report) = run("crested head", "Fine, dense fur", seed);
            assert_mirrored(&report, OrnamentKind::Horn);
            for middle in report.ornaments.iter().filter(|o| o.pair.is_none()) {
                assert_eq!(middle.side, Side::Center);
                assert!((middle.angle + PI / 2.0).abs() < 0.1);
            }
        }
    }

    #[test]
    fn test_plates_only_cover_painted_cells() {
        let traits = Traits::from_text("Humanoid", "Chitinous plates", "4 limbs", "mandibles", &[], 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut grid = PixelGrid::new(64, 64);
        let bounds = Silhouette::layout(64, 64, traits.archetype, false, &mut rng);
        let sil = Silhouette::build(&mut grid, bounds, traits.archetype, &mut rng);
        let before = grid.clone();
        let report = add(&mut grid, &sil, &traits, &mut rng).expect("features");
        assert!(report.ornaments.is_empty());
        for (x, y, code) in grid.iter() {
            if code == PaintCode::LimbAccent {
                assert!(before.code_at(x, y).is_painted());
            }
        }
        assert_eq!(grid.painted_count(), before.painted_count());
    }

    #[test]
    fn test_no_ornaments_without_keywords() {
        let (grid, report) = run("mandibles", "Fine, dense fur", 3);
        assert!(report.ornaments.is_empty());
        assert_eq!(report.plates, 0);
        assert_eq!(grid.count(PaintCode::LimbAccent), 0);
    }
}
