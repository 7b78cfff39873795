//! Color-vision deficiency simulation through an LMS-like cone space.
//!
//! Pipeline per color: sRGB → linear RGB → LMS, drop the missing cone's
//! response and hand it to the remaining cones with fixed weights, then
//! LMS → linear RGB → clamp → sRGB. Each color is independent, so palettes
//! and pixel buffers can be processed in any order.

use crate::color::{linear_to_rgb, rgb_to_linear, LinearRgb, Rgb};
use crate::error::HueError;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear RGB → LMS, row-major.
pub const RGB_TO_LMS: [[f64; 3]; 3] = [
    [0.31399022, 0.63951294, 0.04649755],
    [0.15537241, 0.75789446, 0.08670142],
    [0.01775239, 0.10944209, 0.87256922],
];

/// LMS → linear RGB, row-major. Inverse of [`RGB_TO_LMS`].
pub const LMS_TO_RGB: [[f64; 3]; 3] = [
    [5.47221206, -4.64196010, 0.16963708],
    [-1.12524190, 2.29317094, -0.16789520],
    [0.02980165, -0.19318073, 1.16364789],
];

/// Long/medium/short cone responses. Not clamped; may leave gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lms {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

/// Which cone type is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deficiency {
    /// No L (long-wavelength, "red") cones.
    Protanopia,
    /// No M (medium-wavelength, "green") cones.
    Deuteranopia,
    /// No S (short-wavelength, "blue") cones.
    Tritanopia,
}

impl Deficiency {
    pub const ALL: [Deficiency; 3] = [
        Deficiency::Protanopia,
        Deficiency::Deuteranopia,
        Deficiency::Tritanopia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Deficiency::Protanopia => "protanopia",
            Deficiency::Deuteranopia => "deuteranopia",
            Deficiency::Tritanopia => "tritanopia",
        }
    }

    /// Case-insensitive lookup that returns `None` instead of an error.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
    }

    /// Zeroes the missing cone and redistributes its response.
    pub fn project(self, c: Lms) -> Lms {
        match self {
            Deficiency::Protanopia => Lms {
                l: 0.0,
                m: c.m + c.l * 1.05,
                s: c.s,
            },
            Deficiency::Deuteranopia => Lms {
                l: c.l + c.m * 1.05,
                m: 0.0,
                s: c.s,
            },
            Deficiency::Tritanopia => Lms {
                l: c.l + c.s * 0.3,
                m: c.m + c.s * 0.7,
                s: 0.0,
            },
        }
    }

    /// Approximates how `color` appears to a viewer with this deficiency.
    pub fn simulate(self, color: Rgb) -> Rgb {
        let lms = linear_to_lms(rgb_to_linear(color));
        linear_to_rgb(lms_to_linear(self.project(lms)))
    }

    /// Applies [`Deficiency::simulate`] to every color, preserving order.
    pub fn simulate_palette(self, palette: &Palette) -> Palette {
        palette.iter().map(|&c| self.simulate(c)).collect::<Vec<_>>().into()
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Deficiency {
    type Err = HueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| HueError::UnknownDeficiency(s.to_string()))
    }
}

/// Row-by-row product, accumulated left to right.
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

pub fn linear_to_lms(c: LinearRgb) -> Lms {
    let [l, m, s] = mul(&RGB_TO_LMS, [c.r, c.g, c.b]);
    Lms { l, m, s }
}

pub fn lms_to_linear(c: Lms) -> LinearRgb {
    let [r, g, b] = mul(&LMS_TO_RGB, [c.l, c.m, c.s]);
    LinearRgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgb {
        Rgb::from_hex(s).unwrap()
    }

    #[test]
    fn matrices_are_approximately_inverse() {
        for col in 0..3 {
            let mut unit = [0.0; 3];
            unit[col] = 1.0;
            let back = mul(&LMS_TO_RGB, mul(&RGB_TO_LMS, unit));
            for (row, v) in back.iter().enumerate() {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-6, "[{row}][{col}] = {v}");
            }
        }
    }

    #[test]
    fn red_reference_outputs() {
        let red = hex("#ff0000");
        assert_eq!(Deficiency::Protanopia.simulate(red).to_hex(), "#00fe00");
        assert_eq!(Deficiency::Deuteranopia.simulate(red).to_hex(), "#fe0034");
        assert_eq!(Deficiency::Tritanopia.simulate(red).to_hex(), "#fb2c00");
    }

    #[test]
    fn blue_reference_outputs() {
        let blue = hex("#0000ff");
        assert_eq!(Deficiency::Protanopia.simulate(blue).to_hex(), "#0070fd");
        assert_eq!(Deficiency::Deuteranopia.simulate(blue).to_hex(), "#f300fe");
        assert_eq!(Deficiency::Tritanopia.simulate(blue).to_hex(), "#00fe00");
    }

    #[test]
    fn gray_reference_outputs() {
        let gray = hex("#808080");
        assert_eq!(Deficiency::Protanopia.simulate(gray).to_hex(), "#00fc71");
        assert_eq!(Deficiency::Deuteranopia.simulate(gray).to_hex(), "#fe008c");
        assert_eq!(Deficiency::Tritanopia.simulate(gray).to_hex(), "#00bf00");
    }

    #[test]
    fn black_stays_black_for_every_kind() {
        for kind in Deficiency::ALL {
            assert_eq!(kind.simulate(Rgb::new(0, 0, 0)), Rgb::new(0, 0, 0), "{kind}");
        }
    }

    #[test]
    fn project_zeroes_missing_cone() {
        let c = Lms { l: 0.4, m: 0.3, s: 0.2 };
        assert_eq!(Deficiency::Protanopia.project(c).l, 0.0);
        assert_eq!(Deficiency::Deuteranopia.project(c).m, 0.0);
        assert_eq!(Deficiency::Tritanopia.project(c).s, 0.0);
    }

    #[test]
    fn project_redistributes_with_fixed_weights() {
        let c = Lms { l: 0.4, m: 0.3, s: 0.2 };
        let p = Deficiency::Protanopia.project(c);
        assert!((p.m - (0.3 + 0.4 * 1.05)).abs() < 1e-12);
        assert_eq!(p.s, 0.2);
        let d = Deficiency::Deuteranopia.project(c);
        assert!((d.l - (0.4 + 0.3 * 1.05)).abs() < 1e-12);
        assert_eq!(d.s, 0.2);
        let t = Deficiency::Tritanopia.project(c);
        assert!((t.l - (0.4 + 0.2 * 0.3)).abs() < 1e-12);
        assert!((t.m - (0.3 + 0.2 * 0.7)).abs() < 1e-12);
    }

    #[test]
    fn simulate_palette_maps_each_color_in_order() {
        let palette = Palette::from_hex(&["#ff0000", "#0000ff", "#000000"]).unwrap();
        let out = Deficiency::Protanopia.simulate_palette(&palette);
        assert_eq!(out.to_hex(), vec!["#00fe00", "#0070fd", "#000000"]);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Deficiency::parse("PROTANOPIA"), Some(Deficiency::Protanopia));
        assert_eq!(Deficiency::parse("Deuteranopia"), Some(Deficiency::Deuteranopia));
        assert_eq!(Deficiency::parse("tritanopia"), Some(Deficiency::Tritanopia));
        assert_eq!(Deficiency::parse("unknown_kind"), None);
    }

    #[test]
    fn from_str_reports_unknown_kind() {
        let err = "achromatopsia".parse::<Deficiency>().unwrap_err();
        assert_eq!(err, HueError::UnknownDeficiency("achromatopsia".into()));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Deficiency::Tritanopia).unwrap();
        assert_eq!(json, "\"tritanopia\"");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn simulate_is_deterministic(r: u8, g: u8, b: u8) {
                let c = Rgb::new(r, g, b);
                for kind in Deficiency::ALL {
                    prop_assert_eq!(kind.simulate(c), kind.simulate(c));
                }
            }
        }
    }
}
