//! Hue-relationship templates used by palette generation.
//!
//! A [`Scheme`] fixes how the hue of each palette slot is derived from the
//! base hue. Hues are fractions of a full turn in [0, 1).

use crate::error::HueError;
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum hue jitter for the analogous, triadic and tetradic schemes.
const JITTER: f64 = 0.05;

/// Hue harmony template chosen once per `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    SplitComplementary,
}

impl Scheme {
    /// All schemes, in the order used for uniform selection.
    pub const ALL: [Scheme; 5] = [
        Scheme::Complementary,
        Scheme::Analogous,
        Scheme::Triadic,
        Scheme::Tetradic,
        Scheme::SplitComplementary,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Complementary => "complementary",
            Scheme::Analogous => "analogous",
            Scheme::Triadic => "triadic",
            Scheme::Tetradic => "tetradic",
            Scheme::SplitComplementary => "split_complementary",
        }
    }

    /// Draws one scheme uniformly at random.
    pub fn random(rng: &mut Xorshift64) -> Self {
        *rng.pick(&Self::ALL)
    }

    /// Hue for palette slot `index` relative to `base`.
    ///
    /// Slot 0 is the base hue itself and consumes no draws. For later slots,
    /// schemes with jitter consume one draw from `rng` per call; the
    /// complementary scheme consumes none.
    pub fn slot_hue(self, base: f64, index: usize, rng: &mut Xorshift64) -> f64 {
        if index == 0 {
            return wrap_hue(base);
        }
        let step = (index - 1) as f64;
        let hue = match self {
            Scheme::Complementary => base + 0.5 + step * 0.1,
            Scheme::Analogous => base + step * 0.08 + rng.next_range(-JITTER, JITTER),
            Scheme::Triadic => base + step / 3.0 + rng.next_range(-JITTER, JITTER),
            Scheme::Tetradic => base + step * 0.25 + rng.next_range(-JITTER, JITTER),
            Scheme::SplitComplementary if index == 1 => base + 0.5 + rng.next_range(-0.1, 0.1),
            Scheme::SplitComplementary => base + rng.next_range(0.4, 0.6) + (step - 1.0) * 0.1,
        };
        wrap_hue(hue)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = HueError;

    /// Case-insensitive; accepts `-` or `_` in "split-complementary".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name() == normalized)
            .ok_or_else(|| HueError::UnknownScheme(s.to_string()))
    }
}

/// Wraps a hue into [0, 1). Negative input wraps from the top.
pub fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
