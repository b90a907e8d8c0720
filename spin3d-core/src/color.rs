//! Color conversions and flat-shading rules
//!
//! The conversions run hue in degrees but saturation and value on a 0-255
//! scale (not the conventional 0-1). Downstream shading math depends on
//! that scale, so it must not be "fixed".

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit color string ("ff8040").
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let value = u32::from_str_radix(hex, 16)
            .map_err(|e| format!("invalid color string {:?}: {}", hex, e))?;
        Ok(Self::new(
            (value >> 16 & 255) as u8,
            (value >> 8 & 255) as u8,
            (value & 255) as u8,
        ))
    }
}

/// A color in hue/saturation/value form. `h` in degrees, `s` and `v`
/// on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Round a channel and clamp it into u8 range.
///
/// Back-facing normals can drive `v` negative; the sector math runs on the
/// raw value and only the final channels are clamped, which matches what
/// the drawing surface did with out-of-range channel values.
fn channel(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Convert HSV to RGB. Hue of any sign or magnitude is wrapped into
/// [0, 360); `s` and `v` are on the 0-255 scale.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let mut h = h;
    while h < 0.0 {
        h += 360.0;
    }
    h %= 360.0;

    // Zero saturation short-circuits to gray.
    if s == 0.0 {
        let v = channel(v);
        return Rgb::new(v, v, v);
    }

    let s = s / 255.0;

    let i = (h / 60.0).floor() as i64 % 6;
    let f = (h / 60.0) - (h / 60.0).floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(channel(r), channel(g), channel(b))
}

/// Convert RGB to HSV. With `cone_model` set, saturation is `max - min`;
/// otherwise `(max - min) / max * 255` (0 when max is 0). Hue falls back
/// to 0 where it is undefined (max == min).
pub fn rgb_to_hsv(r: f64, g: f64, b: f64, cone_model: bool) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let mut h = if max == min {
        0.0
    } else if max == r {
        60.0 * (g - b) / (max - min)
    } else if max == g {
        60.0 * (b - r) / (max - min) + 120.0
    } else {
        60.0 * (r - g) / (max - min) + 240.0
    };

    while h < 0.0 {
        h += 360.0;
    }

    let s = if cone_model {
        max - min
    } else if max == 0.0 {
        0.0
    } else {
        (max - min) / max * 255.0
    };

    Hsv { h, s, v: max }
}

/// Pack 0-1 channel values into a 24-bit color number.
pub fn color_hex(r: f64, g: f64, b: f64) -> u32 {
    ((r * 255.0) as u32) << 16 ^ ((g * 255.0) as u32) << 8 ^ (b * 255.0) as u32
}

/// Pack 0-1 channel values into a 6-hex-digit color string.
pub fn color_hex_string(r: f64, g: f64, b: f64) -> String {
    format!("{:06x}", color_hex(r, g, b))
}

/// Fill color for solid (uncolored) rendering: fixed hue and saturation,
/// brightness driven by the face normal's z component.
pub fn solid_shade(nz: f64) -> Rgb {
    hsv_to_rgb(0.4 * 360.0, 0.5 * 255.0, nz * 255.0)
}

/// Fill color for colored rendering: the face's intrinsic hue and
/// saturation are kept and only brightness is modulated by orientation.
pub fn tinted_shade(base: Rgb, nz: f64) -> Rgb {
    let hsv = rgb_to_hsv(base.r as f64, base.g as f64, base.b as f64, false);
    hsv_to_rgb(hsv.h, hsv.s, hsv.v - ((1.0 - nz) * 50.0).round())
}
