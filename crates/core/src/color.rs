//! Color types and conversion functions for the HueVault engine.
//!
//! Provides three color types (`Rgb`, `Hsv`, `LinearRgb`) and pure
//! conversion functions between them. `Rgb` is the only type that crosses
//! the public API boundary; the others are intermediates for generation
//! and simulation. Uses `f64` throughout for precision.

use crate::error::HueError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 8-bit sRGB color.
///
/// Serializes as a lowercase hex string `"#rrggbb"`. Parsing accepts either
/// case and an optional leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSV color with all components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Linear RGB color (gamma-decoded), nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "FF00AA".
    ///
    /// Returns `HueError::InvalidColor` if the input is not exactly six hex
    /// digits after stripping an optional `#`.
    pub fn from_hex(hex: &str) -> Result<Rgb, HueError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(HueError::InvalidColor(format!(
                "expected 6 hex digits in '{hex}', got {}",
                digits.len()
            )));
        }
        // from_str_radix alone would accept a sign prefix like "+f".
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HueError::InvalidColor(format!(
                "non-hex digit in '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                HueError::InvalidColor(format!("invalid {name} component in '{hex}': {e}"))
            })
        };
        Ok(Rgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Converts the color to a lowercase hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Euclidean distance between two colors in 8-bit RGB space.
    ///
    /// Ranges from 0 (identical) to ~441.67 (black vs white).
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = HueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Converts HSV to 8-bit RGB using the six-sector algorithm.
///
/// Each channel is scaled by 255 and truncated, so `v = 1.0` yields 255 and
/// anything just below it yields 254. Hue is expected in [0, 1]; a hue of
/// exactly 1.0 wraps to the red sector.
pub fn hsv_to_rgb(c: Hsv) -> Rgb {
    let (r, g, b) = if c.s == 0.0 {
        (c.v, c.v, c.v)
    } else {
        let scaled = c.h * 6.0;
        let sector = scaled.trunc();
        let f = scaled - sector;
        let p = c.v * (1.0 - c.s);
        let q = c.v * (1.0 - c.s * f);
        let t = c.v * (1.0 - c.s * (1.0 - f));
        match (sector as i64).rem_euclid(6) {
            0 => (c.v, t, p),
            1 => (q, c.v, p),
            2 => (p, c.v, t),
            3 => (p, q, c.v),
            4 => (t, p, c.v),
            _ => (c.v, p, q),
        }
    };
    Rgb {
        r: unit_to_u8(r),
        g: unit_to_u8(g),
        b: unit_to_u8(b),
    }
}

/// Converts 8-bit RGB to HSV.
///
/// Achromatic colors (r == g == b) get hue 0 and saturation 0.
pub fn rgb_to_hsv(c: Rgb) -> Hsv {
    let r = f64::from(c.r) / 255.0;
    let g = f64::from(c.g) / 255.0;
    let b = f64::from(c.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return Hsv { h: 0.0, s: 0.0, v: max };
    }
    let range = max - min;
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hsv {
        h: (h / 6.0).rem_euclid(1.0),
        s: range / max,
        v: max,
    }
}

/// Scales a unit value to a byte by truncation, saturating out-of-range input.
fn unit_to_u8(c: f64) -> u8 {
    (c * 255.0) as u8
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts 8-bit sRGB to linear RGB by normalizing and applying inverse gamma.
pub fn rgb_to_linear(c: Rgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(f64::from(c.r) / 255.0),
        g: srgb_component_to_linear(f64::from(c.g) / 255.0),
        b: srgb_component_to_linear(f64::from(c.b) / 255.0),
    }
}

/// Converts linear RGB to 8-bit sRGB.
///
/// Channels are clamped to [0, 1] before gamma encoding, then scaled by 255
/// and truncated.
pub fn linear_to_rgb(c: LinearRgb) -> Rgb {
    let encode = |v: f64| unit_to_u8(linear_component_to_srgb(v.clamp(0.0, 1.0)));
    Rgb {
        r: encode(c.r),
        g: encode(c.g),
        b: encode(c.b),
    }
}
