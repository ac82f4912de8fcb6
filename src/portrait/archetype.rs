//! Body archetypes.
//!
//! The free-text body type is reduced once to a closed set of archetypes.
//! Each archetype owns the waveforms that shape its silhouette rows, its
//! limb pairing rules and its preferred limb build.

use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BodyArchetype {
    Humanoid,
    Avian,
    Reptilian,
    Insectoid,
    Arachnoid,
    Molluscoid,
    Crystalline,
    PlantLike,
    Aquatic,
    #[default]
    Generic,
}

/// Which part of the body a silhouette row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyRegion {
    Head,
    Torso,
}

/// Per-portrait constants for the periodic torso waveforms.
#[derive(Clone, Copy, Debug)]
pub struct ShapeParams {
    pub segments: i32,
    pub facets: i32,
}

impl ShapeParams {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            segments: rng.int(2, 4),
            facets: rng.int(3, 5),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum LimbStyle {
    Slender,
    #[default]
    Standard,
    Robust,
}

/// How many limb pairs go in each attachment band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LimbPlan {
    pub total: u32,
    pub upper: u32,
    pub mid: u32,
    pub lower: u32,
    /// Free tentacles; used instead of pairs by tentacled molluscoids.
    pub tentacles: u32,
}

impl LimbPlan {
    pub fn pairs(&self) -> u32 {
        self.upper + self.mid + self.lower
    }
}

impl BodyArchetype {
    /// Classify a body-type description. Earlier keywords win, so an
    /// "Avian-Reptilian Hybrid" is avian.
    pub fn from_body_type(body_type: &str) -> Self {
        let body = body_type.to_lowercase();
        let has = |k: &str| body.contains(k);
        if has("humanoid") {
            BodyArchetype::Humanoid
        } else if has("avian") {
            BodyArchetype::Avian
        } else if has("reptilian") {
            BodyArchetype::Reptilian
        } else if has("insectoid") {
            BodyArchetype::Insectoid
        } else if has("arachnoid") {
            BodyArchetype::Arachnoid
        } else if has("crystalline") || has("mineral") {
            BodyArchetype::Crystalline
        } else if has("molluscoid") || has("amorphous") {
            BodyArchetype::Molluscoid
        } else if has("plant-like") || has("fungoid") {
            BodyArchetype::PlantLike
        } else if has("aquatic") || has("fish-like") {
            BodyArchetype::Aquatic
        } else {
            BodyArchetype::Generic
        }
    }

    pub fn is_many_legged(self) -> bool {
        matches!(self, BodyArchetype::Insectoid | BodyArchetype::Arachnoid)
    }

    /// Range the head takes as a fraction of body height.
    pub fn head_ratio_range(self) -> (f64, f64) {
        match self {
            BodyArchetype::Avian | BodyArchetype::Reptilian => (0.20, 0.33),
            BodyArchetype::Insectoid => (0.18, 0.30),
            _ => (0.25, 0.42),
        }
    }

    /// Row width as a fraction of the body box width.
    ///
    /// `rel` is the row's position within its region in `[0, 1)`, `row` the
    /// absolute body row (some waveforms ripple with it).
    pub fn row_width<R: Rng + ?Sized>(
        self,
        region: BodyRegion,
        rel: f64,
        row: i32,
        params: &ShapeParams,
        rng: &mut R,
    ) -> f64 {
        let row = row as f64;
        match region {
            BodyRegion::Head => match self {
                BodyArchetype::Humanoid => 0.70 + (rel * PI).sin() * 0.30,
                BodyArchetype::Avian => (0.50 + (rel * PI * 0.8 + 0.2).sin() * 0.35) * 0.80,
                BodyArchetype::Reptilian => 0.45 + (1.0 - rel.powf(1.2)) * 0.50,
                BodyArchetype::Insectoid | BodyArchetype::Arachnoid => {
                    let brow = if rel < 0.4 { 0.1 } else { -0.08 };
                    0.85 + (rel * PI * 0.7 + PI * 0.15).sin() * 0.20 + brow
                }
                BodyArchetype::Crystalline => {
                    let diamond = 1.0 - (rel - 0.5).abs() * 2.0;
                    0.55 + diamond * 0.45 * ((rel * PI * 3.0 + row).sin() * 0.1 + 1.0)
                }
                BodyArchetype::Molluscoid => {
                    0.60 + (rel * PI * 1.8 + row * 0.2).sin() * 0.35 + rng.float(-0.1, 0.1)
                }
                _ => {
                    let amplitude = rng.float(-0.15, 0.25);
                    let period = 1.3 + rng.float(0.0, 0.7);
                    0.60 + amplitude * (rel * PI * period).sin()
                }
            },
            BodyRegion::Torso => match self {
                BodyArchetype::Humanoid => {
                    let shoulders = (PI * (rel * 2.2).min(1.0)).sin() * 0.15;
                    let waist = rel.powf(1.4) * 0.65;
                    1.0 + shoulders - waist
                }
                BodyArchetype::Avian => 1.1 - rel.powf(1.6) * 0.85,
                BodyArchetype::Reptilian => 0.90 - rel * 0.50 + (rel * PI * 2.0).sin() * 0.05,
                BodyArchetype::Insectoid | BodyArchetype::Arachnoid => {
                    let progress = (rel * params.segments as f64).fract();
                    let pinch = if self == BodyArchetype::Insectoid && rel > 0.2 && rel < 0.8 {
                        0.40 + (rel * PI * 1.5).sin() * 0.15
                    } else {
                        0.9
                    };
                    (0.55 + (progress * PI).sin() * 0.30) * pinch
                }
                BodyArchetype::PlantLike => {
                    let phase = rng.float(0.0, 2.0);
                    0.45 + (rel * PI * 2.8 + phase).sin() * 0.35
                        + (1.0 - rel) * 0.25
                        + rng.float(0.0, 0.1)
                }
                BodyArchetype::Crystalline => {
                    0.6 + (rel * PI * params.facets as f64 + row * 0.1).sin().abs() * 0.35
                }
                BodyArchetype::Molluscoid => {
                    let period = 1.5 + rng.float(0.0, 1.0);
                    let phase = rng.float(0.0, 1.0);
                    0.75 + (rel * PI * period + row * 0.3 + phase).sin() * 0.25 + rng.float(-0.15, 0.15)
                }
                _ => {
                    let phase = rng.float(0.0, 1.0);
                    0.90 - rel * 0.35 + (rel * PI * 2.5 + phase).sin() * 0.18
                }
            },
        }
    }

    /// Split a limb total into attachment bands.
    pub fn limb_plan<R: Rng + ?Sized>(self, total: u32, appendages: &str, rng: &mut R) -> LimbPlan {
        let mut plan = LimbPlan {
            total,
            ..LimbPlan::default()
        };
        let pairs = total / 2;

        match self {
            BodyArchetype::Humanoid | BodyArchetype::Avian => {
                self.plan_biped(&mut plan, rng);
            }
            BodyArchetype::Reptilian if total <= 4 => {
                self.plan_biped(&mut plan, rng);
            }
            BodyArchetype::Insectoid | BodyArchetype::Arachnoid | BodyArchetype::Reptilian => {
                match pairs {
                    0 => {}
                    1 => {
                        if rng.chance(0.5) {
                            plan.upper = 1;
                        } else {
                            plan.lower = 1;
                        }
                    }
                    2 => {
                        plan.upper = 1;
                        plan.lower = 1;
                    }
                    _ => {
                        let upper = rng.int(1, (pairs / 2).max(1) as i32) as u32;
                        let mid_cap = (pairs / 3).saturating_sub(u32::from(upper > 1));
                        let mid = rng.int(0, mid_cap as i32) as u32;
                        plan.upper = upper.min(pairs);
                        plan.mid = mid.min(pairs - plan.upper);
                        plan.lower = pairs - plan.upper - plan.mid;
                    }
                }
            }
            BodyArchetype::Molluscoid if appendages.contains("tentacles") => {
                plan.tentacles = total;
            }
            _ => {
                plan.upper = rng.int(0, pairs as i32) as u32;
                plan.lower = pairs - plan.upper;
            }
        }
        plan
    }

    fn plan_biped<R: Rng + ?Sized>(self, plan: &mut LimbPlan, rng: &mut R) {
        let avian = self == BodyArchetype::Avian;
        plan.upper = u32::from(plan.total >= 2);
        plan.lower = if avian {
            u32::from(plan.total >= 2)
        } else {
            u32::from(plan.total >= 4)
        };
        if plan.total == 2 && !avian && rng.chance(0.5) {
            plan.upper = 0;
            plan.lower = 1;
        }
    }

    /// The build this archetype leans towards, if any.
    pub fn limb_style_hint(self) -> Option<LimbStyle> {
        match self {
            BodyArchetype::Insectoid | BodyArchetype::Arachnoid | BodyArchetype::Avian => {
                Some(LimbStyle::Slender)
            }
            BodyArchetype::Reptilian | BodyArchetype::Crystalline => Some(LimbStyle::Robust),
            _ => None,
        }
    }
}

impl fmt::Display for BodyArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyArchetype::Humanoid => "humanoid",
            BodyArchetype::Avian => "avian",
            BodyArchetype::Reptilian => "reptilian",
            BodyArchetype::Insectoid => "insectoid",
            BodyArchetype::Arachnoid => "arachnoid",
            BodyArchetype::Molluscoid => "molluscoid",
            BodyArchetype::Crystalline => "crystalline",
            BodyArchetype::PlantLike => "plant-like",
            BodyArchetype::Aquatic => "aquatic",
            BodyArchetype::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Pick a limb build: uniform roll, nudged by the archetype hint, with
/// explicit keywords in the appendage text taking precedence.
pub fn choose_limb_style<R: Rng + ?Sized>(
    archetype: BodyArchetype,
    appendages: &str,
    rng: &mut R,
) -> LimbStyle {
    let roll = rng.float(0.0, 1.0);
    let mut style = if roll < 0.33 {
        LimbStyle::Slender
    } else if roll < 0.66 {
        LimbStyle::Standard
    } else {
        LimbStyle::Robust
    };
    if let Some(hint) = archetype.limb_style_hint() {
        if rng.chance(0.4) {
            style = hint;
        }
    }
    if appendages.contains("robust") || appendages.contains("powerful") {
        style = LimbStyle::Robust;
    }
    if appendages.contains("slender") || appendages.contains("delicate") {
        style = LimbStyle::Slender;
    }
    style
}

/// Explicit "<N> limbs" count in an appendage description.
pub fn explicit_limb_count(appendages: &str) -> Option<u32> {
    appendages.match_indices("limbs").find_map(|(at, _)| {
        let before = appendages[..at].trim_end();
        let digits_start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        before[digits_start..].parse::<u32>().ok()
    })
}
