//! Eyes and mouth.

use rand::Rng;
use serde::Serialize;

use super::grid::{PaintCode, PixelGrid};
use super::silhouette::Silhouette;
use super::{PortraitError, Traits};
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PupilKind {
    None,
    VerticalSlit,
    HorizontalSlit,
    Dot,
}

/// Where an eye was placed. Cells are only carved where the body is painted,
/// so a region may end up partly empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EyeRegion {
    pub center: (i32, i32),
    pub width: i32,
    pub height: i32,
    pub pupil: PupilKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum MouthKind {
    #[default]
    None,
    Mouth,
    Mandibles,
    Proboscis,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FaceReport {
    pub eyes: Vec<EyeRegion>,
    pub mouth: MouthKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EyeStyle {
    Plain,
    Compound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PupilRoll {
    None,
    Slit,
    Dot,
}

pub(crate) fn add<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    sil: &Silhouette,
    traits: &Traits,
    rng: &mut R,
) -> Result<FaceReport, PortraitError> {
    sil.validate()?;
    let mut report = FaceReport::default();
    let head = traits.head.as_str();
    let head_h = sil.bounds.head_height;
    let head_w = sil.head_width();
    let head_w_f = head_w as f64;
    let mid_x = grid.width as i32 / 2;
    let top = sil.bounds.y;

    let compound = head.contains("compound");
    let mut pupil = if rng.chance(0.35) {
        PupilRoll::Slit
    } else if rng.chance(0.7) {
        PupilRoll::Dot
    } else {
        PupilRoll::None
    };
    if traits.archetype.is_many_legged() || compound {
        pupil = PupilRoll::None;
    }

    let mut count = 2;
    let mut size = (rng.int(2, 6), rng.int(2, 5));
    let style = if compound && !head.contains("multiple eyes") {
        EyeStyle::Compound
    } else {
        EyeStyle::Plain
    };

    if head.contains("no visible eyes") {
        count = 0;
    } else if head.contains("single occulus") || head.contains("cycloptic") {
        count = 1;
        let w = rng.int((head_w_f * 0.40).floor() as i32, (head_w_f * 0.75).floor() as i32).max(6);
        let h = rng.int((w as f64 * 0.40).floor() as i32, (w as f64 * 0.70).floor() as i32).max(5);
        size = (w, h);
    } else if head.contains("multiple eyes") {
        count = rng.int(3, 8);
        size = (rng.int(1, 4), rng.int(1, 4));
    } else if style == EyeStyle::Compound {
        let w = rng.int(
            ((head_w_f * 0.30).floor() as i32).max(5),
            ((head_w_f * 0.55).floor() as i32).max(8),
        );
        let h = rng.int(
            ((head_h as f64 * 0.25).floor() as i32).max(3),
            ((head_h as f64 * 0.50).floor() as i32).max(7),
        );
        size = (w, h);
    }

    let eye_row = top + (head_h as f64 * rng.float(0.35, 0.55)).floor() as i32;
    let wobble = (head_h as f64 * 0.05).floor() as i32;

    let eyes = if head.contains("multiple eyes") && style == EyeStyle::Plain {
        place_scattered(grid, sil, count, size, eye_row, rng)
    } else {
        let mut placements = Vec::with_capacity(count as usize);
        // Odd counts put one eye on the midline; the rest come in mirrored pairs.
        if count % 2 == 1 {
            placements.push((mid_x, eye_row + rng.int(-wobble, wobble)));
        }
        for _ in 0..count / 2 {
            let factor = match count {
                2 => rng.float(0.15, 0.25),
                _ => rng.float(0.18, 0.28),
            };
            let row = eye_row + rng.int(-wobble, wobble);
            let dx = (head_w_f * factor * rng.float(0.8, 1.2)).floor() as i32;
            placements.push((mid_x - dx, row));
            placements.push((mid_x + dx, row));
        }
        let (sw, sh) = size;
        placements
            .into_iter()
            .map(|(cx, cy)| {
                let cx = cx.clamp(sw / 2, (grid.width as i32 - 1 - sw / 2).max(sw / 2));
                let cy = cy.clamp(top + sh / 2, (top + head_h - sh / 2).max(top + sh / 2));
                ((cx, cy), size)
            })
            .collect()
    };

    for (center, eye_size) in eyes {
        if carve_eye(grid, center, eye_size, style, rng) == 0 {
            tracing::debug!(?center, "eye landed off the body, dropped");
            continue;
        }
        let (sw, sh) = eye_size;
        let pupil_kind = if style == EyeStyle::Compound || sw <= 1 || sh <= 1 {
            PupilKind::None
        } else {
            let kind = draw_pupil(grid, center, eye_size, pupil, rng);
            if rng.chance(0.85) {
                highlight(grid, center, eye_size, rng);
            }
            kind
        };
        report.eyes.push(EyeRegion {
            center,
            width: sw,
            height: sh,
            pupil: pupil_kind,
        });
    }

    if !head.contains("no distinct head")
        && (head.contains("mandibles") || head.contains("proboscis") || rng.chance(0.85))
    {
        report.mouth = mouth(grid, top, head_h, head_w, mid_x, head, rng);
    }
    Ok(report)
}

/// Inclusive cell box covered by an eye of `size` centered on `center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EyeBox {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl EyeBox {
    fn around((cx, cy): (i32, i32), (w, h): (i32, i32)) -> Self {
        Self {
            x0: cx - (w - 1) / 2,
            y0: cy - (h - 1) / 2,
            x1: cx + w / 2,
            y1: cy + h / 2,
        }
    }

    /// True unless at least one empty row or column separates the boxes.
    fn crowds(&self, other: &EyeBox) -> bool {
        self.x0 <= other.x1 + 1
            && other.x0 <= self.x1 + 1
            && self.y0 <= other.y1 + 1
            && other.y0 <= self.y1 + 1
    }

    /// Every cell of the box can take an eye.
    fn fits(&self, grid: &PixelGrid) -> bool {
        (self.y0..=self.y1).all(|y| (self.x0..=self.x1).all(|x| grid.code_at(x, y).is_carvable()))
    }
}

/// Lay out 3 to 8 small eyes as a midline eye (odd counts) plus mirrored
/// pairs in up to two rows. Every eye lands fully on carvable cells with an
/// empty gutter around it, shrinking toward 1x1 when the head is crowded.
fn place_scattered<R: Rng + ?Sized>(
    grid: &PixelGrid,
    sil: &Silhouette,
    count: i32,
    size: (i32, i32),
    eye_row: i32,
    rng: &mut R,
) -> Vec<((i32, i32), (i32, i32))> {
    let mid_x = grid.width as i32 / 2;
    let head_w = sil.head_width() as f64;
    let pairs = count / 2;
    let lanes = if count >= 5 { (pairs + 1) / 2 } else { pairs.max(1) };
    let rows = (pairs + lanes - 1) / lanes;
    let row_step = size.1 + rng.int(1, 2);
    let first_row = eye_row - (rows - 1) * row_step / 2;

    // (planned dx from the midline, planned row); dx 0 is the midline eye.
    let mut groups = Vec::with_capacity(pairs as usize + 1);
    if count % 2 == 1 {
        groups.push((0, first_row + rng.int(-1, 1)));
    }
    for k in 0..pairs {
        let lane = (k % lanes) as f64;
        let dx = (head_w * (0.12 + lane * rng.float(0.10, 0.15))).floor() as i32;
        groups.push((dx.max(1), first_row + (k / lanes) * row_step));
    }

    let b = &sil.bounds;
    let head_rows = (b.y, b.y + b.head_height.max(1) - 1);
    let body_rows = (b.y, b.bottom() - 1);
    let mut taken: Vec<EyeBox> = Vec::new();
    let mut eyes = Vec::with_capacity(count as usize);

    for (planned_dx, planned_row) in groups {
        let spot = shrinking(size).find_map(|eye_size| {
            [head_rows, body_rows].into_iter().find_map(|rows| {
                find_spot(grid, &taken, mid_x, planned_dx, planned_row, rows, eye_size)
                    .map(|centers| (centers, eye_size))
            })
        });
        match spot {
            Some((centers, eye_size)) => {
                for center in centers {
                    taken.push(EyeBox::around(center, eye_size));
                    eyes.push((center, eye_size));
                }
            }
            None => tracing::debug!(planned_dx, planned_row, "no room for eye group"),
        }
    }
    eyes
}

/// The requested size, then one cell smaller in each dimension down to 1x1.
fn shrinking((w, h): (i32, i32)) -> impl Iterator<Item = (i32, i32)> {
    let steps = w.max(h).max(1);
    (0..steps).map(move |i| ((w - i).max(1), (h - i).max(1)))
}

/// Nearest free position to the planned one, searched over `rows`. A zero
/// `planned_dx` keeps the eye on the midline; otherwise both mirrored
/// members must fit.
fn find_spot(
    grid: &PixelGrid,
    taken: &[EyeBox],
    mid_x: i32,
    planned_dx: i32,
    planned_row: i32,
    (row_lo, row_hi): (i32, i32),
    size: (i32, i32),
) -> Option<Vec<(i32, i32)>> {
    let dxs: Vec<i32> = if planned_dx == 0 {
        vec![0]
    } else {
        (1..=grid.width as i32 / 2).collect()
    };
    let mut candidates: Vec<(i32, i32, i32)> = (row_lo..=row_hi)
        .flat_map(|row| dxs.iter().map(move |&dx| (row, dx)))
        .map(|(row, dx)| (2 * (row - planned_row).abs() + (dx - planned_dx).abs(), row, dx))
        .collect();
    candidates.sort_unstable();

    candidates.into_iter().find_map(|(_, row, dx)| {
        let centers = if dx == 0 {
            vec![(mid_x, row)]
        } else {
            vec![(mid_x - dx, row), (mid_x + dx, row)]
        };
        let boxes: Vec<EyeBox> = centers.iter().map(|&c| EyeBox::around(c, size)).collect();
        let clear = boxes.iter().enumerate().all(|(i, bx)| {
            bx.fits(grid)
                && taken.iter().all(|t| !bx.crowds(t))
                && boxes[i + 1..].iter().all(|other| !bx.crowds(other))
        });
        clear.then_some(centers)
    })
}

/// Elliptical eye, carved only into body or ornament cells. Returns the
/// number of cells carved.
fn carve_eye<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    (cx, cy): (i32, i32),
    (w, h): (i32, i32),
    style: EyeStyle,
    rng: &mut R,
) -> usize {
    let mut carved = 0;
    let rx = (w as f64 / 2.0).max(f64::EPSILON);
    let ry = (h as f64 / 2.0).max(f64::EPSILON);
    for dy in -((h - 1) / 2)..=h / 2 {
        for dx in -((w - 1) / 2)..=w / 2 {
            let inside = (dx as f64 / rx).powi(2) + (dy as f64 / ry).powi(2) <= 1.1;
            if !inside && w > 1 && h > 1 {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if !grid.code_at(x, y).is_carvable() {
                continue;
            }
            let code = match style {
                EyeStyle::Compound if x % 2 != y % 2 && !rng.chance(0.6) => PaintCode::Pupil,
                _ => PaintCode::Eye,
            };
            grid.set(x, y, code);
            carved += 1;
        }
    }
    carved
}

fn draw_pupil<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    (cx, cy): (i32, i32),
    (w, h): (i32, i32),
    roll: PupilRoll,
    rng: &mut R,
) -> PupilKind {
    if roll == PupilRoll::None {
        return PupilKind::None;
    }
    let py = cy + rng.int(-1, 1);
    let px = cx + rng.int(-1, 1);
    let thickness = ((w.min(h) as f64 / rng.float(2.2, 3.5)).floor() as i32).max(1);
    let t_lo = -((thickness - 1) / 2);
    let t_hi = thickness / 2;
    let mut stamp = |x: i32, y: i32| {
        grid.set_if(x, y, PaintCode::Pupil, |c| c == PaintCode::Eye);
    };

    match roll {
        PupilRoll::Slit => {
            if rng.chance(0.5) {
                let reach = ((h - 1) as f64 / 2.5) as i32;
                for s in -reach..=reach {
                    for t in t_lo..=t_hi {
                        stamp(px + t, py + s);
                    }
                }
                PupilKind::VerticalSlit
            } else {
                let reach = ((w - 1) as f64 / 2.5) as i32;
                for s in -reach..=reach {
                    for t in t_lo..=t_hi {
                        stamp(px + s, py + t);
                    }
                }
                PupilKind::HorizontalSlit
            }
        }
        _ => {
            let r = (thickness as f64 / 2.0).max(f64::EPSILON);
            for dy in -(thickness / 2)..=t_hi {
                for dx in -(thickness / 2)..=t_hi {
                    let inside = (dx as f64 / r).powi(2) + (dy as f64 / r).powi(2) <= 1.1;
                    if inside || thickness <= 1 {
                        stamp(px + dx, py + dy);
                    }
                }
            }
            PupilKind::Dot
        }
    }
}

/// A glint in the eye's upper-left corner.
fn highlight<R: Rng + ?Sized>(grid: &mut PixelGrid, (cx, cy): (i32, i32), (w, h): (i32, i32), rng: &mut R) {
    let y = cy - (h - 1) / 2 + rng.int(0, 1);
    let x = cx - (w - 1) / 2 + rng.int(0, 1);
    let ocular = |c: PaintCode| matches!(c, PaintCode::Eye | PaintCode::Pupil);
    if grid.set_if(x, y, PaintCode::EyeHighlight, ocular) && w > 3 && rng.chance(0.5) {
        grid.set_if(x + 1, y, PaintCode::EyeHighlight, ocular);
    }
}

fn mouth<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    top: i32,
    head_h: i32,
    head_w: i32,
    mid_x: i32,
    head: &str,
    rng: &mut R,
) -> MouthKind {
    let y = top + (head_h as f64 * rng.float(0.65, 0.85)).floor() as i32;
    let hw = head_w as f64;
    let width = rng.int(((hw * 0.25).floor() as i32).max(3), (hw * 0.70).floor() as i32);
    let mut height = rng.int(1, 4);

    if head.contains("mandibles") {
        height = rng.int(2, 5);
        // One set of stroke offsets, mirrored to both sides.
        let strokes: Vec<(i32, i32, i32)> = (0..(width + 1) / 2)
            .map(|_| (rng.int(1, 3), rng.int(0, 2), rng.int(1, 2)))
            .collect();
        for sign in [-1, 1] {
            for (m, &(reach, drop, thickness)) in strokes.iter().enumerate() {
                let m = m as i32;
                let from = (mid_x + m * sign, y - height / 3 + m);
                let to = (mid_x + m * sign + reach * sign, y + height / 2 - m + drop);
                grid.draw_line(from, to, PaintCode::Feature, thickness, false);
            }
        }
        MouthKind::Mandibles
    } else if head.contains("proboscis") {
        let length = rng.int(3, head_h);
        let tip = (mid_x + rng.int(-2, 2), y + length);
        grid.draw_line((mid_x, y), tip, PaintCode::Feature, rng.int(1, 3), false);
        MouthKind::Proboscis
    } else {
        let start_x = mid_x - width / 2;
        for fy in 0..height {
            for fx in 0..width {
                let edge_row = fy == 0 || fy == height - 1;
                let corner = fx < 1 || fx > width - 2;
                if edge_row && corner && height > 1 {
                    continue;
                }
                grid.set_if(start_x + fx, y + fy, PaintCode::Feature, PaintCode::is_carvable);
            }
        }
        MouthKind::Mouth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(body: &str, head: &str, seed: u64) -> (PixelGrid, FaceReport) {
        let traits = Traits::from_text(body, "Smooth, leathery skin", "4 limbs", head, &[], 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = PixelGrid::new(64, 64);
        let bounds = Silhouette::layout(64, 64, traits.archetype, head.contains("no distinct head"), &mut rng);
        let sil = Silhouette::build(&mut grid, bounds, traits.archetype, &mut rng);
        let report = add(&mut grid, &sil, &traits, &mut rng).expect("face");
        (grid, report)
    }

    #[test]
    fn test_single_occulus_is_centered() {
        for seed in 0..30 {
            let (grid, report) = run("Humanoid", "large single occulus", seed);
            assert_eq!(report.eyes.len(), 1);
            assert_eq!(report.eyes[0].center.0, 32);
            assert!(report.eyes[0].width >= 6);
            assert!(grid.count(PaintCode::Eye) + grid.count(PaintCode::Pupil) > 0);
        }
    }

    #[test]
    fn test_no_visible_eyes() {
        for seed in 0..20 {
            let (grid, report) = run("Humanoid", "no visible eyes", seed);
            assert!(report.eyes.is_empty());
            assert_eq!(grid.count(PaintCode::Eye), 0);
            assert_eq!(grid.count(PaintCode::Pupil), 0);
        }
    }

    /// Number of 4-connected regions of eye, pupil or highlight pixels.
    fn eye_regions(grid: &PixelGrid) -> usize {
        let ocular = |c: PaintCode| matches!(c, PaintCode::Eye | PaintCode::Pupil | PaintCode::EyeHighlight);
        let mut seen = vec![false; grid.width * grid.height];
        let mut regions = 0;
        for (x, y, code) in grid.iter() {
            let i = y as usize * grid.width + x as usize;
            if !ocular(code) || seen[i] {
                continue;
            }
            regions += 1;
            seen[i] = true;
            let mut stack = vec![(x, y)];
            while let Some((cx, cy)) = stack.pop() {
                for (nx, ny) in [(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)] {
                    let Some(code) = grid.get(nx, ny) else { continue };
                    let j = ny as usize * grid.width + nx as usize;
                    if ocular(code) && !seen[j] {
                        seen[j] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
        regions
    }

    #[test]
    fn test_multiple_eyes_are_distinct_regions() {
        for seed in 0..200 {
            let (grid, report) = run("Humanoid", "multiple eyes (e.g., 2-8)", seed);
            let regions = eye_regions(&grid);
            assert!((3..=8).contains(&regions), "seed {seed}: {regions} regions");
            assert_eq!(regions, report.eyes.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_scattered_eyes_keep_a_gutter() {
        for seed in 0..50 {
            let (_, report) = run("Insectoid", "multiple eyes", seed);
            let boxes: Vec<EyeBox> = report
                .eyes
                .iter()
                .map(|e| EyeBox::around(e.center, (e.width, e.height)))
                .collect();
            for (i, a) in boxes.iter().enumerate() {
                for b in &boxes[i + 1..] {
                    assert!(!a.crowds(b), "seed {seed}: {a:?} touches {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_single_occulus_is_one_region() {
        for seed in 0..50 {
            let (grid, _) = run("Humanoid", "large single occulus", seed);
            assert_eq!(eye_regions(&grid), 1, "seed {seed}");
        }
    }

    #[test]
    fn test_shrinking_ends_at_one_cell() {
        let sizes: Vec<(i32, i32)> = shrinking((4, 2)).collect();
        assert_eq!(sizes, vec![(4, 2), (3, 1), (2, 1), (1, 1)]);
        assert!(EyeBox::around((10, 10), (3, 3)).crowds(&EyeBox::around((13, 10), (3, 3))));
        assert!(!EyeBox::around((10, 10), (3, 3)).crowds(&EyeBox::around((14, 10), (3, 3))));
    }

    #[test]
    fn test_eye_pairs_are_symmetric() {
        for seed in 0..30 {
            let (_, report) = run("Humanoid", "mandibles", seed);
            assert_eq!(report.eyes.len(), 2);
            let (l, r) = (report.eyes[0].center, report.eyes[1].center);
            assert_eq!(l.1, r.1);
            assert_eq!(32 - l.0, r.0 - 32);
            assert_eq!(report.mouth, MouthKind::Mandibles);
        }
    }

    #[test]
    fn test_insectoid_and_compound_have_no_pupils() {
        for seed in 0..20 {
            let (_, report) = run("Insectoid", "antennae", seed);
            assert!(report.eyes.iter().all(|e| e.pupil == PupilKind::None));
            let (_, report) = run("Humanoid", "compound eyes", seed);
            assert_eq!(report.eyes.len(), 2);
            assert!(report.eyes.iter().all(|e| e.pupil == PupilKind::None));
        }
    }

    #[test]
    fn test_headless_has_no_mouth() {
        for seed in 0..20 {
            let (grid, report) = run("Molluscoid (Gastropod-like)", "no distinct head", seed);
            assert_eq!(report.mouth, MouthKind::None);
            assert_eq!(grid.count(PaintCode::Feature), 0);
        }
    }

    #[test]
    fn test_proboscis() {
        let (grid, report) = run("Insectoid", "proboscis", 5);
        assert_eq!(report.mouth, MouthKind::Proboscis);
        assert!(grid.count(PaintCode::Feature) > 0);
    }
}
