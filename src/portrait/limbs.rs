//! Limb attachment: jointed arms and legs, wings, tentacles and fins.

use std::f64::consts::PI;

use rand::Rng;
use serde::Serialize;

use super::archetype::{choose_limb_style, explicit_limb_count, BodyArchetype, LimbPlan, LimbStyle};
use super::grid::{PaintCode, PixelGrid};
use super::silhouette::{Side, Silhouette};
use super::{PortraitError, Traits};
use crate::random::RandomSource;

/// Upper bound on an explicit limb count, so absurd descriptions stay drawable.
pub const MAX_LIMBS: u32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LimbBand {
    Upper,
    Mid,
    Lower,
    Wing,
    Tentacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LimbStroke {
    pub band: LimbBand,
    pub side: Side,
    pub attach: (i32, i32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FinReport {
    pub paired: u32,
    pub median: u32,
    pub tail: bool,
}

impl FinReport {
    pub fn any(&self) -> bool {
        self.paired > 0 || self.median > 0 || self.tail
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LimbReport {
    pub plan: LimbPlan,
    pub style: LimbStyle,
    pub strokes: Vec<LimbStroke>,
    /// Pairs whose attachment row fell outside the paintable body.
    pub skipped_pairs: u32,
    pub fins: FinReport,
}

impl LimbReport {
    pub fn count(&self, band: LimbBand) -> usize {
        self.strokes.iter().filter(|s| s.band == band).count()
    }
}

/// How many limbs the appendage text asks for.
pub(crate) fn limb_count<R: Rng + ?Sized>(traits: &Traits, rng: &mut R) -> u32 {
    if let Some(n) = explicit_limb_count(&traits.appendages) {
        return n.min(MAX_LIMBS);
    }
    if traits.appendages.contains("tentacles") {
        rng.int(4, 10) as u32
    } else if traits.archetype.is_many_legged() {
        rng.int(6, 8) as u32
    } else {
        rng.int(2, 4) as u32
    }
}

fn is_limbless(appendages: &str) -> bool {
    appendages.contains("no distinct limbs") || appendages.contains("serpentine")
}

fn has_fins(traits: &Traits) -> bool {
    traits.body.contains("fish-like")
        || (traits.body.contains("aquatic")
            && (traits.appendages.contains("fin") || traits.appendages.contains("flipper")))
}

/// Draw every limb the traits call for.
pub(crate) fn attach<R: Rng + ?Sized>(
    grid: &mut PixelGrid,
    sil: &Silhouette,
    traits: &Traits,
    rng: &mut R,
) -> Result<LimbReport, PortraitError> {
    sil.validate()?;
    let mut report = LimbReport::default();
    if is_limbless(&traits.appendages) {
        return Ok(report);
    }

    let total = limb_count(traits, rng);
    report.style = choose_limb_style(traits.archetype, &traits.appendages, rng);
    report.plan = traits.archetype.limb_plan(total, &traits.appendages, rng);
    let plan = report.plan;

    let mut painter = LimbPainter {
        grid,
        sil,
        appendages: &traits.appendages,
        style: report.style,
        report: &mut report,
    };

    let b = sil.bounds;
    let torso = (b.height - b.head_height) as f64;
    let shoulder_y = b.y + b.head_height + (torso * rng.float(0.05, 0.20)).floor() as i32;
    let mid_y = b.y + b.head_height + (torso * rng.float(0.40, 0.60)).floor() as i32;
    let hip_y = b.bottom() - (b.height as f64 * rng.float(0.05, 0.20)).floor() as i32;

    if plan.tentacles > 0 {
        painter.tentacles(plan.tentacles, rng);
        return Ok(report);
    }

    painter.upper_pairs(plan.upper, shoulder_y, traits, rng);
    painter.mid_pairs(plan.mid, mid_y, rng);
    if has_fins(traits) {
        painter.fins(mid_y, rng);
    } else {
        painter.lower_pairs(plan.lower, hip_y, rng);
    }
    Ok(report)
}

struct LimbPainter<'a> {
    grid: &'a mut PixelGrid,
    sil: &'a Silhouette,
    appendages: &'a str,
    style: LimbStyle,
    report: &'a mut LimbReport,
}

/// Length and thickness ranges by band and build.
fn limb_dims<R: Rng + ?Sized>(style: LimbStyle, band: LimbBand, body_h: i32, rng: &mut R) -> (i32, i32) {
    let h = body_h as f64;
    let len = |rng: &mut R, lo: f64, hi: f64| rng.int((h * lo).floor() as i32, (h * hi).floor() as i32);
    match (band, style) {
        (LimbBand::Mid, LimbStyle::Slender) => (len(rng, 0.35, 0.70), 1),
        (LimbBand::Mid, LimbStyle::Robust) => (len(rng, 0.25, 0.50), rng.int(2, 5)),
        (LimbBand::Mid, LimbStyle::Standard) => (len(rng, 0.30, 0.60), rng.int(2, 3)),
        (LimbBand::Lower, LimbStyle::Slender) => (len(rng, 0.45, 0.70), rng.int(1, 2)),
        (LimbBand::Lower, LimbStyle::Robust) => (len(rng, 0.30, 0.55), rng.int(3, 6)),
        (LimbBand::Lower, LimbStyle::Standard) => (len(rng, 0.38, 0.62), rng.int(2, 4)),
        (_, LimbStyle::Slender) => (len(rng, 0.50, 0.85), rng.int(1, 2)),
        (_, LimbStyle::Robust) => (len(rng, 0.30, 0.60), rng.int(3, 6)),
        (_, LimbStyle::Standard) => (len(rng, 0.40, 0.70), rng.int(2, 4)),
    }
}

/// Mirror a rightward heading for the left side.
fn mirrored(heading: f64, side: Side) -> f64 {
    if side == Side::Left {
        PI - heading
    } else {
        heading
    }
}

impl LimbPainter<'_> {
    fn record(&mut self, band: LimbBand, side: Side, attach: (i32, i32)) {
        self.report.strokes.push(LimbStroke { band, side, attach });
    }

    fn upper_pairs<R: Rng + ?Sized>(&mut self, pairs: u32, shoulder_y: i32, traits: &Traits, rng: &mut R) {
        let b = self.sil.bounds;
        let offset = rng.jitter(0.2);
        let tilt = rng.jitter(0.3);
        let winged = traits.archetype == BodyArchetype::Avian
            && (self.appendages.contains("wing") || self.appendages.contains("membranous"));

        for pair in 0..pairs as i32 {
            let (length, thickness) = limb_dims(self.style, LimbBand::Upper, b.height, rng);
            let attach_y = shoulder_y + pair * (thickness + rng.int(2, 5));
            if attach_y >= b.bottom() - 3 || attach_y < b.y + b.head_height / 2 {
                self.report.skipped_pairs += 1;
                continue;
            }
            let segments = rng.int(1, 3);
            for side in Side::PAIR {
                let attach = (self.sil.edge_x(attach_y, side), attach_y);
                if winged && pair == 0 {
                    self.wing(attach, length, thickness, side, tilt, rng);
                    self.record(LimbBand::Wing, side, attach);
                } else {
                    let heading = mirrored(offset + tilt, side);
                    self.jointed(attach, length, thickness, heading, segments, false, rng);
                    self.record(LimbBand::Upper, side, attach);
                }
            }
        }
    }

    fn mid_pairs<R: Rng + ?Sized>(&mut self, pairs: u32, mid_y: i32, rng: &mut R) {
        let b = self.sil.bounds;
        let offset = rng.jitter(0.4);
        let tilt = rng.jitter(0.35);

        // Torso rows a mid limb may attach to.
        let (lo, hi) = (b.y + b.head_height + 1, b.bottom() - 4);
        for pair in 0..pairs as i32 {
            let (length, thickness) = limb_dims(self.style, LimbBand::Mid, b.height, rng);
            let row = mid_y + pair * (thickness + rng.int(3, 6));
            let jitter = rng.int(-5, 5);
            if row < lo || row > hi {
                self.report.skipped_pairs += 1;
                continue;
            }
            let attach_y = (row + jitter).clamp(lo, hi);
            let segments = rng.int(2, 3);
            let is_leg = rng.chance(0.3);
            for side in Side::PAIR {
                let attach = (self.sil.edge_x(attach_y, side), attach_y);
                let heading = if is_leg {
                    PI / 2.0 - tilt.abs() * side.signf()
                } else {
                    mirrored(offset + tilt, side)
                };
                self.jointed(attach, length, thickness, heading, segments, is_leg, rng);
                self.record(LimbBand::Mid, side, attach);
            }
        }
    }

    fn lower_pairs<R: Rng + ?Sized>(&mut self, pairs: u32, hip_y: i32, rng: &mut R) {
        let b = self.sil.bounds;
        let stance = rng.float(0.01, 0.40);
        let torso_top = b.y + b.head_height + 1;

        for pair in 0..pairs as i32 {
            let (length, thickness) = limb_dims(self.style, LimbBand::Lower, b.height, rng);
            let attach_y = hip_y - pair * (thickness + rng.int(1, 4));
            if attach_y < torso_top {
                self.report.skipped_pairs += 1;
                continue;
            }
            let segments = rng.int(1, 3);
            for side in Side::PAIR {
                let attach = (self.sil.edge_x(attach_y, side), attach_y);
                // Legs splay outward from straight down.
                let heading = PI / 2.0 - stance * side.signf();
                self.jointed(attach, length, thickness, heading, segments, true, rng);
                self.record(LimbBand::Lower, side, attach);
            }
        }
    }

    /// A tapering limb of 1-3 straight segments with an end feature.
    #[allow(clippy::too_many_arguments)]
    fn jointed<R: Rng + ?Sized>(
        &mut self,
        start: (i32, i32),
        length: i32,
        thickness: i32,
        heading: f64,
        segments: i32,
        is_leg: bool,
        rng: &mut R,
    ) {
        let segments = segments.max(1);
        let seg_len = (length / segments).max(3);
        let (mut x, mut y) = start;

        for s in 0..segments {
            let bend = match (is_leg, s) {
                (true, 0) => 0.0,
                (true, _) => rng.jitter(0.2),
                (false, 0) => rng.jitter(0.1),
                (false, _) => rng.jitter(0.375),
            };
            let angle = heading + bend;
            let taper = (s as f64 * (thickness as f64 / (segments + 1) as f64) * 0.8).floor() as i32;
            let seg_thickness = (thickness - taper).max(1);
            let end = (
                (x as f64 + angle.cos() * seg_len as f64).round() as i32,
                (y as f64 + angle.sin() * seg_len as f64).round() as i32,
            );
            self.grid.draw_line((x, y), end, PaintCode::Limb, seg_thickness, false);
            (x, y) = end;
        }

        self.end_feature((x, y), thickness, heading, is_leg, rng);
    }

    fn end_feature<R: Rng + ?Sized>(
        &mut self,
        (x, y): (i32, i32),
        thickness: i32,
        heading: f64,
        is_leg: bool,
        rng: &mut R,
    ) {
        let text = self.appendages;
        let robust = i32::from(self.style == LimbStyle::Robust);

        if text.contains("claw") || text.contains("talon") {
            for _ in 0..rng.int(1, 3) {
                let angle = heading + rng.jitter(0.4);
                let len = rng.int(2, 4) as f64;
                let tip = (
                    (x as f64 + angle.cos() * len).round() as i32,
                    (y as f64 + angle.sin() * len).round() as i32,
                );
                self.grid.draw_line((x, y), tip, PaintCode::Limb, 1, true);
            }
        } else if text.contains("pincer") {
            let len = rng.int(2, 3) as f64;
            for spread in [-0.5, 0.5] {
                let angle = heading + spread;
                let tip = (
                    (x as f64 + angle.cos() * len).round() as i32,
                    (y as f64 + angle.sin() * len).round() as i32,
                );
                self.grid.draw_line((x, y), tip, PaintCode::Limb, (thickness - 1).max(1), true);
            }
        } else if text.contains("manipulator") || text.contains("hand") {
            let sx = (thickness + 1 + robust).max(2);
            let sy = (thickness + robust).max(2);
            self.blob((x, y), (-sx / 2, (sx + 1) / 2), (-sy / 2, (sy + 1) / 2), 0.7, rng);
        } else if text.contains("hoof") && is_leg {
            let sx = (thickness + 2).max(2);
            let sy = thickness.max(1);
            self.blob((x, y), (-sx / 2, (sx + 1) / 2), (0, sy - 1), 1.0, rng);
        } else if (text.contains("pad") || text.contains("feet") || text.contains("foot")) && is_leg {
            let sx = (thickness + 1).max(2);
            let sy = thickness.max(1);
            self.blob((x, y), (-sx / 2, (sx + 1) / 2), (0, sy - 1), 0.8, rng);
        } else if rng.chance(0.8) {
            let size = ((thickness as f64 * 0.8).floor() as i32).max(1);
            self.blob((x, y), (-size / 2, (size + 1) / 2), (-size / 2, (size + 1) / 2), 1.0, rng);
        }
    }

    /// Fill empty cells in an inclusive offset rectangle around `center`.
    fn blob<R: Rng + ?Sized>(
        &mut self,
        (cx, cy): (i32, i32),
        (x0, x1): (i32, i32),
        (y0, y1): (i32, i32),
        density: f64,
        rng: &mut R,
    ) {
        for dy in y0..=y1 {
            for dx in x0..=x1 {
                if self.grid.code_at(cx + dx, cy + dy) == PaintCode::Empty && rng.chance(density) {
                    self.grid.set(cx + dx, cy + dy, PaintCode::Limb);
                }
            }
        }
    }

    /// Membranous wing: a jointed leading edge with membrane strokes trailing off it.
    fn wing<R: Rng + ?Sized>(
        &mut self,
        (mut x, mut y): (i32, i32),
        limb_length: i32,
        thickness: i32,
        side: Side,
        tilt: f64,
        rng: &mut R,
    ) {
        let segments = rng.int(2, 4);
        let span = limb_length as f64 * rng.float(2.5, 4.5);
        let seg_len = (span / segments as f64).floor();
        let mut angle = mirrored(rng.float(-0.12, 0.13), side) + tilt;
        let s = side.signf();

        for ws in 0..segments {
            let wing_thickness = (thickness + 2 - (ws as f64 * 1.5).floor() as i32).max(1);
            let end = (
                (x as f64 + angle.cos() * seg_len).round() as i32,
                (y as f64 + angle.sin() * seg_len).round() as i32,
            );
            self.grid.draw_line((x, y), end, PaintCode::Limb, wing_thickness, true);

            let fills = (seg_len * 0.8).floor() as i32;
            for f in 0..fills {
                let progress = f as f64 / fills as f64;
                let from = (
                    (x as f64 + (end.0 - x) as f64 * progress).round() as i32,
                    (y as f64 + (end.1 - y) as f64 * progress).round() as i32,
                );
                let reach = (seg_len * rng.float(0.5, 1.0) * (1.0 - progress * 0.6)
                    + wing_thickness as f64 * 0.7)
                    .floor()
                    .max(1.0);
                let membrane = angle + PI / 2.0 * s * rng.float(0.8, 1.2);
                let to = (
                    (from.0 as f64 + membrane.cos() * reach).round() as i32,
                    (from.1 as f64 + membrane.sin() * reach).round() as i32,
                );
                self.grid.draw_line(from, to, PaintCode::Limb, 1, true);
            }

            (x, y) = end;
            let fold = if rng.chance(0.7) { 1.0 } else { -0.5 };
            angle += rng.float(0.4, 0.8) * s * fold;
        }
    }

    /// Free-hanging tentacles alternating sides down the body.
    fn tentacles<R: Rng + ?Sized>(&mut self, count: u32, rng: &mut R) {
        let b = self.sil.bounds;
        let (gw, gh) = (self.grid.width as i32, self.grid.height as i32);
        let thickness = match self.style {
            LimbStyle::Slender => rng.int(1, 2),
            LimbStyle::Robust => rng.int(3, 5),
            LimbStyle::Standard => rng.int(2, 4),
        };

        for i in 0..count {
            let side = if i % 2 == 0 { Side::Left } else { Side::Right };
            let s = side.signf();
            let attach_y = b.y + (b.height as f64 * rng.float(0.15, 0.95)).floor() as i32;
            let attach = (self.sil.edge_x(attach_y, side), attach_y);
            let length = rng.int(15, 40);
            let curl = s * rng.float(0.8, 2.2) * rng.sign() as f64;
            let (mut tx, mut ty) = attach;

            for l in 0..length {
                let progress = l as f64 / length as f64;
                let wave = (l as f64 * (0.1 + rng.float(0.0, 0.1)) + i as f64 * 0.7 + rng.float(0.0, 1.0)).sin();
                let angle = curl * (0.05 + wave * (0.7 + rng.float(0.0, 0.5)));
                let step_x = (angle.cos() * s * (1.0 + rng.float(0.0, 0.4)) + rng.jitter(0.6)).round() as i32;
                let step_y = 1 + (angle.sin() * (0.8 + rng.float(0.0, 0.4)) + rng.float(-0.45, 0.55) * 1.1).round() as i32;
                let taper = ((thickness as f64 * (1.0 - progress * 0.7)).floor() as i32).max(1);
                self.grid.draw_line((tx, ty), (tx + step_x, ty + step_y), PaintCode::Limb, taper, true);
                tx += step_x;
                ty += step_y;
                if ty >= gh - 1 || tx < -5 || tx > gw + 4 {
                    break;
                }
            }
            self.record(LimbBand::Tentacle, side, attach);
        }
    }

    /// Paired side fins, median fins and a tail fin in place of lower legs.
    fn fins<R: Rng + ?Sized>(&mut self, mid_y: i32, rng: &mut R) {
        let b = self.sil.bounds;
        let quarter = (b.height as f64 * 0.25).floor() as i32;

        for pair in 0..rng.int(1, 3) {
            let base_len = rng.int(6, 18);
            let projection = rng.int(10, 25) as f64;
            let attach_y = mid_y + rng.int(-quarter, quarter) + pair * rng.int(8, 15);
            if attach_y < b.y + b.head_height || attach_y > b.bottom() - 3 {
                continue;
            }
            let pair_angle = rng.jitter(0.4);
            for side in Side::PAIR {
                let attach_x = self.sil.edge_x(attach_y, side);
                let angle = mirrored(0.0, side) + pair_angle + PI / 2.0 * rng.jitter(0.2);
                self.side_fin((attach_x, attach_y), angle, side, base_len, projection, rng);
            }
            self.report.fins.paired += 1;
        }

        for dorsal in [true, false] {
            if !rng.chance(0.75) {
                continue;
            }
            let length = rng.int(15, 35);
            let max_height = rng.int(6, 16) as f64;
            let (head_part, torso_part, dir) = if dorsal { (0.1, 0.2, -1) } else { (0.9, 0.8, 1) };
            let attach_y = b.y
                + (b.head_height as f64 * head_part).floor() as i32
                + ((b.height - b.head_height) as f64 * torso_part).floor() as i32;
            let x_start = self.sil.edge_x(attach_y, Side::Center) - length / 2;
            for i in 0..length {
                let wave = (i as f64 / length as f64 * PI * rng.float(0.8, 1.2)).sin();
                let height = ((max_height * (wave + 0.30)).floor() as i32).max(1);
                for h in 0..height {
                    self.grid.set_if(x_start + i, attach_y + h * dir, PaintCode::Limb, |c| c == PaintCode::Empty);
                }
            }
            self.report.fins.median += 1;
        }

        if rng.chance(0.9) && !self.appendages.contains("no tail") {
            self.tail_fin(rng);
            self.report.fins.tail = true;
        }
    }

    fn side_fin<R: Rng + ?Sized>(
        &mut self,
        (ax, ay): (i32, i32),
        angle: f64,
        side: Side,
        base_len: i32,
        projection: f64,
        rng: &mut R,
    ) {
        let b = self.sil.bounds;
        let (sin, cos) = angle.sin_cos();
        let spread = angle + PI / 2.0 * side.signf() * 0.8;

        for i in 0..base_len {
            let y = ay + (sin * i as f64).round() as i32 - (base_len as f64 * sin / 2.0).floor() as i32;
            let x = ax + (cos * i as f64).round() as i32 - (base_len as f64 * cos / 2.0).floor() as i32;
            if (y as f64) < b.y as f64 + b.head_height as f64 * 0.5 || y >= b.bottom() {
                continue;
            }
            let reach = projection * (0.5 + (i as f64 / base_len as f64 * PI).sin() * 0.5);
            let tip = (
                x + (spread.cos() * reach).round() as i32,
                y + (spread.sin() * reach).round() as i32,
            );
            self.grid.draw_line((x, y), tip, PaintCode::Limb, rng.int(1, 2), true);

            let steps = (tip.0 - x).abs().max((tip.1 - y).abs());
            for l in 0..steps {
                let progress = l as f64 / steps as f64;
                let fx = (x as f64 + (tip.0 - x) as f64 * progress).round() as i32;
                let fy = (y as f64 + (tip.1 - y) as f64 * progress).round() as i32;
                if self.grid.code_at(fx, fy) == PaintCode::Empty && rng.chance(0.6) {
                    self.grid.set(fx, fy, PaintCode::Limb);
                }
            }
        }
    }

    fn tail_fin<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let b = self.sil.bounds;
        let base_y = b.bottom() - rng.int(1, 3);
        let base_x = self.sil.edge_x(base_y, Side::Center);
        let spread = rng.int(10, 28);
        let length = rng.int(8, 20) as f64;
        let shape = rng.float(0.0, 1.0);
        let half = spread as f64 / 2.0;
        let quarter = spread as f64 / 4.0;

        for i in -(spread / 2)..=(spread + 1) / 2 {
            let reach = i.abs() as f64;
            let drop = if shape < 0.33 {
                // Swept, with a shorter lower lobe.
                let lobe = if i < 0 { 0.7 } else { 1.0 };
                length * (1.0 - (reach / half).min(1.0).powi(2)) * lobe
            } else if shape < 0.66 {
                // Forked.
                if reach > quarter {
                    length
                } else {
                    length * 0.5 * (1.0 - (reach / quarter).powf(1.5))
                }
            } else {
                // Rounded.
                length * (1.0 - (reach / half).min(1.0).powi(2)).sqrt()
            };
            let tip = (base_x + i, base_y + drop.max(2.0).floor() as i32);
            self.grid.draw_line((base_x, base_y), tip, PaintCode::Limb, rng.int(1, 3), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(body: &str, appendages: &str, seed: u64) -> (PixelGrid, Silhouette, Traits, ChaCha8Rng) {
        let traits = Traits::from_text(body, "Smooth, leathery skin", appendages, "antennae", &[], 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = PixelGrid::new(64, 64);
        let bounds = Silhouette::layout(64, 64, traits.archetype, false, &mut rng);
        let sil = Silhouette::build(&mut grid, bounds, traits.archetype, &mut rng);
        (grid, sil, traits, rng)
    }

    #[test]
    fn test_limbless_draws_nothing() {
        let (mut grid, sil, traits, mut rng) = setup("Reptilian", "Serpentine body, no distinct limbs", 1);
        let before = grid.clone();
        let report = attach(&mut grid, &sil, &traits, &mut rng).expect("limbs");
        assert_eq!(grid, before);
        assert_eq!(report.plan, LimbPlan::default());
        assert_eq!(grid.count(PaintCode::Limb), 0);
    }

    #[test]
    fn test_pairs_are_symmetric_in_rows() {
        for seed in 0..200 {
            let (mut grid, sil, traits, mut rng) = setup("Insectoid", "6 limbs (types: jointed legs)", seed);
            let report = attach(&mut grid, &sil, &traits, &mut rng).expect("limbs");
            assert_eq!(report.plan.pairs(), 3);
            assert_eq!(report.strokes.len(), 6, "seed {seed}");
            assert_eq!(report.skipped_pairs, 0, "seed {seed}");
            let left: Vec<_> = report.strokes.iter().filter(|s| s.side == Side::Left).collect();
            let right: Vec<_> = report.strokes.iter().filter(|s| s.side == Side::Right).collect();
            assert_eq!(left.len(), right.len());
            for (l, r) in left.iter().zip(&right) {
                assert_eq!(l.attach.1, r.attach.1);
                assert_eq!(l.band, r.band);
            }
            assert_eq!(report.count(LimbBand::Wing), 0);
            assert!(!report.fins.any());
        }
    }

    #[test]
    fn test_avian_wings() {
        let mut drew_wings = false;
        for seed in 0..20 {
            let (mut grid, sil, traits, mut rng) = setup("Avian", "4 limbs (types: membranous wings)", seed);
            let report = attach(&mut grid, &sil, &traits, &mut rng).expect("limbs");
            drew_wings |= report.count(LimbBand::Wing) == 2;
            assert_eq!(report.count(LimbBand::Upper), 0);
        }
        assert!(drew_wings);
    }

    #[test]
    fn test_fish_get_fins_not_legs() {
        for seed in 0..20 {
            let (mut grid, sil, traits, mut rng) = setup("Aquatic Fish-like", "4 limbs (types: fin-like flippers)", seed);
            let report = attach(&mut grid, &sil, &traits, &mut rng).expect("limbs");
            assert_eq!(report.count(LimbBand::Lower), 0);
            assert!(grid.count(PaintCode::Limb) > 0);
        }
    }

    #[test]
    fn test_molluscoid_tentacles() {
        let (mut grid, sil, traits, mut rng) =
            setup("Molluscoid (Cephalopod-like)", "Multiple prehensile tentacles", 4);
        assert_eq!(traits.archetype, BodyArchetype::Molluscoid);
        let report = attach(&mut grid, &sil, &traits, &mut rng).expect("limbs");
        assert!((4..=10).contains(&report.plan.tentacles));
        assert_eq!(report.count(LimbBand::Tentacle), report.plan.tentacles as usize);
        assert!(grid.count(PaintCode::Limb) > 0);
    }

    #[test]
    fn test_limb_count_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let t = Traits::from_text("Humanoid", "Fur", "1000 limbs", "horns", &[], 0.0);
        assert_eq!(limb_count(&t, &mut rng), MAX_LIMBS);
        let t = Traits::from_text("Arachnoid", "Fur", "multiple (10+) limbs", "horns", &[], 0.0);
        for _ in 0..20 {
            assert!((6..=8).contains(&limb_count(&t, &mut rng)));
        }
        let t = Traits::from_text("Humanoid", "Fur", "writhing tentacles", "horns", &[], 0.0);
        for _ in 0..20 {
            assert!((4..=10).contains(&limb_count(&t, &mut rng)));
        }
    }
}
