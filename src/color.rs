//! Color conversion helpers.

use image::Rgb;

/// Convert HSL (each component in `[0, 1]`) to an 8-bit RGB triple.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb<u8> {
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };
    Rgb([to_byte(r), to_byte(g), to_byte(b)])
}

/// Same as [`hsl_to_rgb`] with the hue given in degrees.
pub fn hsl_degrees(hue: f64, s: f64, l: f64) -> Rgb<u8> {
    hsl_to_rgb(wrap_hue(hue) / 360.0, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0))
}

/// Wrap any hue in degrees into `[0, 360)`.
pub fn wrap_hue(hue: f64) -> f64 {
    hue.rem_euclid(360.0)
}

/// Shortest angle between two hues, in `[0, 180]`.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}
