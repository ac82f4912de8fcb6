//! Palette derivation from skin, body type and planet temperature.

use image::Rgb;
use rand::Rng;

use super::grid::PaintCode;
use super::{PortraitError, Traits};
use crate::color::{hsl_degrees, hue_distance, wrap_hue};
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub body: Rgb<u8>,
    pub accent1: Rgb<u8>,
    pub accent2: Rgb<u8>,
    pub eye: Rgb<u8>,
    pub pupil: Rgb<u8>,
    pub eye_highlight: Rgb<u8>,
    pub feature: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl Palette {
    /// Neutral grey palette used when derivation fails.
    pub fn fallback() -> Self {
        Self {
            body: Rgb([128, 128, 128]),
            accent1: Rgb([150, 150, 150]),
            accent2: Rgb([100, 100, 100]),
            eye: Rgb([0, 255, 0]),
            pupil: Rgb([0, 100, 0]),
            eye_highlight: Rgb([100, 255, 100]),
            feature: Rgb([200, 200, 200]),
            background: Rgb([0, 0, 0]),
        }
    }

    /// Color for a paint code; `None` for empty cells.
    pub fn color(&self, code: PaintCode) -> Option<Rgb<u8>> {
        match code {
            PaintCode::Empty => None,
            PaintCode::Body | PaintCode::Limb => Some(self.body),
            PaintCode::Accent1 | PaintCode::LimbAccent => Some(self.accent1),
            PaintCode::Accent2 => Some(self.accent2),
            PaintCode::Eye => Some(self.eye),
            PaintCode::Pupil => Some(self.pupil),
            PaintCode::EyeHighlight => Some(self.eye_highlight),
            PaintCode::Feature => Some(self.feature),
        }
    }
}

/// Hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Hsl {
    h: f64,
    s: f64,
    l: f64,
}

impl Hsl {
    fn rgb(self) -> Rgb<u8> {
        hsl_degrees(self.h, self.s, self.l)
    }

    fn is_finite(self) -> bool {
        self.h.is_finite() && self.s.is_finite() && self.l.is_finite()
    }
}

/// Derive a palette. Fails on non-finite inputs; callers fall back to
/// [`Palette::fallback`].
pub(crate) fn derive<R: Rng + ?Sized>(traits: &Traits, rng: &mut R) -> Result<Palette, PortraitError> {
    if !traits.temperature.is_finite() {
        return Err(PortraitError::Palette(format!(
            "non-finite surface temperature {}",
            traits.temperature
        )));
    }

    let mut base = base_color(traits, rng);
    adjust_for_temperature(&mut base, traits.temperature, rng);

    let accent1 = Hsl {
        h: wrap_hue(base.h + rng.float(25.0, 70.0) * rng.sign() as f64),
        s: (base.s + rng.float(-0.25, 0.35)).clamp(0.1, 1.0),
        l: (base.l + rng.float(-0.25, 0.30)).clamp(0.1, 0.9),
    };

    let accent2 = if rng.chance(0.5) {
        Hsl {
            h: wrap_hue(base.h + rng.float(130.0, 230.0) * rng.sign() as f64),
            s: (base.s + rng.float(-0.3, 0.25)).clamp(0.1, 1.0),
            l: (base.l + rng.float(-0.3, 0.20)).clamp(0.1, 0.9),
        }
    } else {
        // Lightness split of the first accent.
        let shift = rng.float(0.15, 0.3);
        Hsl {
            h: wrap_hue(accent1.h + rng.float(-20.0, 20.0)),
            s: (accent1.s + rng.float(-0.1, 0.1)).clamp(0.05, 1.0),
            l: if accent1.l > 0.5 {
                (accent1.l - shift).max(0.05)
            } else {
                (accent1.l + shift).min(0.95)
            },
        }
    };

    let mut eye = Hsl {
        h: wrap_hue(base.h + 180.0 + rng.float(-100.0, 100.0)),
        s: rng.float(0.55, 1.0),
        l: rng.float(0.40, 0.90),
    };
    if traits.bioluminescent {
        eye.s = rng.float(0.9, 1.0);
        eye.l = rng.float(0.70, 0.95);
    }
    separate_eye(&mut eye, base, rng);

    let pupil = Hsl {
        h: eye.h,
        s: (eye.s * 1.05).min(1.0),
        l: (eye.l * 0.25).max(0.01),
    };
    let highlight = Hsl {
        h: eye.h,
        s: (eye.s * 0.3).max(0.0),
        l: (eye.l * 1.3 + 0.3).min(1.0),
    };

    let push = rng.float(0.1, 0.25);
    let feature = Hsl {
        h: wrap_hue(base.h + rng.float(5.0, 35.0) * rng.sign() as f64),
        s: (base.s - rng.float(0.1, 0.3)).max(0.05),
        l: if base.l > 0.5 {
            (base.l - push).max(0.05)
        } else {
            (base.l + push).min(0.95)
        },
    };

    let all = [base, accent1, accent2, eye, pupil, highlight, feature];
    if let Some(bad) = all.iter().find(|c| !c.is_finite()) {
        return Err(PortraitError::Palette(format!("non-finite color {:?}", bad)));
    }

    Ok(Palette {
        body: base.rgb(),
        accent1: accent1.rgb(),
        accent2: accent2.rgb(),
        eye: eye.rgb(),
        pupil: pupil.rgb(),
        eye_highlight: highlight.rgb(),
        feature: feature.rgb(),
        background: Rgb([0, 0, 0]),
    })
}

fn base_color<R: Rng + ?Sized>(traits: &Traits, rng: &mut R) -> Hsl {
    let skin = traits.skin.as_str();
    let body = traits.body.as_str();

    if skin.contains("chitin")
        || skin.contains("exoskeleton")
        || body.contains("crystalline")
        || skin.contains("rocky")
        || body.contains("mineral-based")
    {
        let h = rng.float(0.0, 360.0);
        let s = rng.float(0.05, 0.5);
        let l = rng.float(0.20, 0.60);
        let s = if body.contains("crystalline") {
            rng.float(0.4, 0.8)
        } else {
            s
        };
        Hsl { h, s, l }
    } else if skin.contains("scale") || body.contains("reptilian") || body.contains("fish-like") {
        Hsl {
            h: rng.float(60.0, 270.0),
            s: rng.float(0.30, 0.85),
            l: rng.float(0.25, 0.65),
        }
    } else if skin.contains("feather") || body.contains("avian") {
        Hsl {
            h: rng.float(0.0, 360.0),
            s: rng.float(0.40, 0.95),
            l: rng.float(0.45, 0.85),
        }
    } else if skin.contains("gelatinous") || body.contains("molluscoid") || body.contains("amorphous") {
        Hsl {
            h: rng.float(120.0, 340.0),
            s: rng.float(0.45, 0.95),
            l: rng.float(0.40, 0.80),
        }
    } else if body.contains("plant-like") || body.contains("fungoid") {
        Hsl {
            h: rng.float(20.0, 190.0),
            s: rng.float(0.25, 0.80),
            l: rng.float(0.15, 0.60),
        }
    } else {
        Hsl {
            h: rng.float(0.0, 360.0),
            s: rng.float(0.10, 0.70),
            l: rng.float(0.25, 0.75),
        }
    }
}

/// Hot worlds bleach and warm the base color; frozen ones invert and deepen it.
fn adjust_for_temperature<R: Rng + ?Sized>(base: &mut Hsl, celsius: f64, rng: &mut R) {
    if celsius > 80.0 {
        base.h = wrap_hue(base.h + rng.float(-20.0, 40.0));
        base.l = (base.l + rng.float(0.05, 0.15)).min(0.85);
        base.s = (base.s - rng.float(0.1, 0.25)).max(0.05);
    } else if celsius < -40.0 {
        base.h = wrap_hue(base.h + 180.0 + rng.float(-40.0, 40.0));
        base.l = (base.l - rng.float(0.05, 0.2)).max(0.10);
        base.s = (base.s + rng.float(0.05, 0.2)).min(0.95);
    }
}

/// Push the eye away from the body when the two are close in both hue and
/// lightness.
fn separate_eye<R: Rng + ?Sized>(eye: &mut Hsl, base: Hsl, rng: &mut R) {
    if hue_distance(eye.h, base.h) < 35.0 && (eye.l - base.l).abs() < 0.15 {
        eye.l = if base.l > 0.5 {
            (base.l - 0.35).max(0.15)
        } else {
            (base.l + 0.35).min(0.85)
        };
        eye.h = wrap_hue(eye.h + rng.float(30.0, 90.0) * rng.sign() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portrait::archetype::BodyArchetype;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn traits(body: &str, skin: &str, temperature: f64) -> Traits {
        Traits {
            body: body.to_lowercase(),
            skin: skin.to_lowercase(),
            appendages: String::new(),
            head: String::new(),
            archetype: BodyArchetype::from_body_type(body),
            bioluminescent: false,
            armored: false,
            temperature,
        }
    }

    #[test]
    fn test_resolves_limb_codes() {
        let p = Palette::fallback();
        assert_eq!(p.color(PaintCode::Limb), Some(p.body));
        assert_eq!(p.color(PaintCode::LimbAccent), Some(p.accent1));
        assert_eq!(p.color(PaintCode::Empty), None);
    }

    #[test]
    fn test_non_finite_temperature_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let t = traits("Humanoid", "Fine, dense fur", f64::NAN);
        assert!(matches!(derive(&t, &mut rng), Err(PortraitError::Palette(_))));
        let t = traits("Humanoid", "Fine, dense fur", f64::INFINITY);
        assert!(derive(&t, &mut rng).is_err());
    }

    #[test]
    fn test_background_is_black() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for temp in [-120.0, 15.0, 300.0] {
            let t = traits("Insectoid", "Chitinous plates", temp);
            let p = derive(&t, &mut rng).expect("palette");
            assert_eq!(p.background, Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn test_eye_stands_out_from_body() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..200 {
            let t = traits("Reptilian", "Overlapping scales (reptilian)", 20.0);
            let p = derive(&t, &mut rng).expect("palette");
            assert_ne!(p.eye, p.body);
        }
    }

    #[test]
    fn test_temperature_shifts() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..100 {
            let mut hot = Hsl { h: 350.0, s: 0.06, l: 0.84 };
            adjust_for_temperature(&mut hot, 120.0, &mut rng);
            assert!(hot.l <= 0.85 && hot.s >= 0.05 && (0.0..360.0).contains(&hot.h));

            let mut cold = Hsl { h: 10.0, s: 0.9, l: 0.12 };
            adjust_for_temperature(&mut cold, -60.0, &mut rng);
            assert!(cold.l >= 0.10 && cold.s <= 0.95);
            assert!((130.0..=230.0).contains(&cold.h));
        }
    }

    #[test]
    fn test_eye_split_across_red() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let base = Hsl { h: 355.0, s: 0.6, l: 0.45 };
        for _ in 0..50 {
            let mut eye = Hsl { h: 5.0, s: 0.8, l: 0.50 };
            separate_eye(&mut eye, base, &mut rng);
            assert!((eye.l - 0.80).abs() < 1e-9);
        }

        let mut far = Hsl { h: 175.0, s: 0.8, l: 0.50 };
        separate_eye(&mut far, base, &mut rng);
        assert_eq!(far, Hsl { h: 175.0, s: 0.8, l: 0.50 });
    }
}
