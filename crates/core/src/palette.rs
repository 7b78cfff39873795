//! Palette type and the palette engine.
//!
//! The engine produces colors by rejection sampling in HSV: each slot draws
//! candidates until one keeps the configured minimum RGB distance from its
//! neighbors, or the attempt budget runs out (see [`crate::sampler`]).
//!
//! Every operation takes an explicit [`Xorshift64`]; the engine holds no
//! random state of its own, so one engine can serve concurrent callers.

use crate::color::{hsv_to_rgb, Hsv, Rgb};
use crate::config::EngineConfig;
use crate::error::HueError;
use crate::prng::Xorshift64;
use crate::sampler::{SlotOutcome, SlotSampler};
use crate::scheme::Scheme;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Saturation window for the base color and for untemplated colors.
const BASE_SATURATION: (f64, f64) = (0.4, 0.9);
/// Value window for the base color and for untemplated colors.
const BASE_VALUE: (f64, f64) = (0.3, 0.7);
/// Saturation window for scheme-derived colors.
const SCHEME_SATURATION: (f64, f64) = (0.3, 0.95);
/// Value window for scheme-derived colors.
const SCHEME_VALUE: (f64, f64) = (0.25, 0.75);
/// Smallest palette `generate` will produce.
pub const MIN_PALETTE_LEN: usize = 2;
/// Largest palette any engine operation will produce. Requests above it are
/// capped; the RGB cube holds only a few hundred colors 25 apart.
pub const MAX_PALETTE_LEN: usize = 256;

/// An ordered sequence of colors. Position is meaningful: callers map it to
/// UI slots and lock state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Parses each string as a hex color ("#rrggbb" or "rrggbb").
    ///
    /// Fails on the first malformed color.
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self, HueError> {
        let colors = hexes
            .iter()
            .map(|h| Rgb::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    /// Lowercase `#rrggbb` strings, in palette order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<Rgb> {
        self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgb> {
        self.colors.iter()
    }

    /// Smallest pairwise RGB distance, or `None` for fewer than two colors.
    pub fn min_pairwise_distance(&self) -> Option<f64> {
        self.colors
            .iter()
            .enumerate()
            .flat_map(|(i, a)| self.colors[i + 1..].iter().map(move |b| a.distance(*b)))
            .reduce(f64::min)
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Self::new(colors)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Result of one engine call.
///
/// `outcomes` has one entry per color the call produced, in the order those
/// colors were produced. Locked and pre-existing colors have no entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub palette: Palette,
    pub outcomes: Vec<SlotOutcome>,
    /// The hue template, for calls that use one.
    pub scheme: Option<Scheme>,
}

impl Generation {
    fn unchanged(palette: Palette) -> Self {
        Self {
            palette,
            outcomes: Vec::new(),
            scheme: None,
        }
    }

    /// Number of slots that fell back to an unconstrained candidate.
    pub fn exhausted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_accepted()).count()
    }

    /// True when every produced color satisfied the distance constraint.
    pub fn is_clean(&self) -> bool {
        self.exhausted_count() == 0
    }

    pub fn into_palette(self) -> Palette {
        self.palette
    }
}

/// Generates, regenerates and expands palettes.
#[derive(Debug, Clone, Default)]
pub struct PaletteEngine {
    config: EngineConfig,
}

impl PaletteEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, HueError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates `count` colors around one random base hue and one random
    /// [`Scheme`]. `count` is clamped to
    /// [`MIN_PALETTE_LEN`]..=[`MAX_PALETTE_LEN`].
    ///
    /// Draw order: base hue, scheme, then per attempt the slot's hue jitter
    /// (if the scheme has one), saturation, value.
    pub fn generate(&self, count: usize, rng: &mut Xorshift64) -> Generation {
        self.generate_with_scheme(count, None, rng)
    }

    /// Like [`generate`](Self::generate), but with a fixed scheme when
    /// `scheme` is `Some`. A fixed scheme skips the scheme draw.
    pub fn generate_with_scheme(
        &self,
        count: usize,
        scheme: Option<Scheme>,
        rng: &mut Xorshift64,
    ) -> Generation {
        let count = count.clamp(MIN_PALETTE_LEN, MAX_PALETTE_LEN);
        let base_hue = rng.next_f64();
        let scheme = scheme.unwrap_or_else(|| Scheme::random(rng));
        let sampler = SlotSampler::new(self.config.min_distance, self.config.generate_attempts);

        let mut colors: Vec<Rgb> = Vec::with_capacity(count);
        let mut outcomes = Vec::with_capacity(count);
        for index in 0..count {
            let (color, outcome) = sampler.fill(&colors, || {
                let hsv = if index == 0 {
                    Hsv {
                        h: base_hue,
                        s: rng.next_range(BASE_SATURATION.0, BASE_SATURATION.1),
                        v: rng.next_range(BASE_VALUE.0, BASE_VALUE.1),
                    }
                } else {
                    let h = scheme.slot_hue(base_hue, index, rng);
                    Hsv {
                        h,
                        s: rng.next_range(SCHEME_SATURATION.0, SCHEME_SATURATION.1),
                        v: rng.next_range(SCHEME_VALUE.0, SCHEME_VALUE.1),
                    }
                };
                hsv_to_rgb(hsv)
            });
            colors.push(color);
            outcomes.push(outcome);
        }

        let generation = Generation {
            palette: Palette::new(colors),
            outcomes,
            scheme: Some(scheme),
        };
        tracing::debug!(
            count,
            %scheme,
            base_hue,
            exhausted = generation.exhausted_count(),
            "generated palette"
        );
        generation
    }

    /// Replaces every color whose index is not in `locked`, in index order.
    ///
    /// Each candidate must clear every other color currently in the palette:
    /// locked colors, colors already replaced in this call, and original
    /// colors not yet visited. Locked indices past the end are ignored.
    pub fn regenerate(
        &self,
        palette: &Palette,
        locked: &[usize],
        rng: &mut Xorshift64,
    ) -> Generation {
        let locked: HashSet<usize> = locked.iter().copied().collect();
        let sampler = SlotSampler::new(self.config.min_distance, self.config.refill_attempts);

        let mut colors = palette.colors.clone();
        let mut outcomes = Vec::new();
        for index in 0..colors.len() {
            if locked.contains(&index) {
                continue;
            }
            let neighbors: Vec<Rgb> = colors
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != index)
                .map(|(_, &c)| c)
                .collect();
            let (color, outcome) = sampler.fill(&neighbors, || free_candidate(rng));
            colors[index] = color;
            outcomes.push(outcome);
        }

        let generation = Generation {
            palette: Palette::new(colors),
            outcomes,
            scheme: None,
        };
        tracing::debug!(
            len = palette.len(),
            locked = locked.len(),
            exhausted = generation.exhausted_count(),
            "regenerated unlocked colors"
        );
        generation
    }

    /// Appends colors until the palette holds `new_size` entries.
    ///
    /// Returns the palette unchanged when `new_size` does not exceed its
    /// current length. `new_size` is capped at [`MAX_PALETTE_LEN`]. New
    /// colors must clear every existing color and every color appended
    /// earlier in the same call.
    pub fn expand(&self, palette: &Palette, new_size: usize, rng: &mut Xorshift64) -> Generation {
        let new_size = new_size.min(MAX_PALETTE_LEN);
        if new_size <= palette.len() {
            return Generation::unchanged(palette.clone());
        }
        let sampler = SlotSampler::new(self.config.min_distance, self.config.refill_attempts);

        let mut colors = palette.colors.clone();
        let mut outcomes = Vec::with_capacity(new_size - palette.len());
        while colors.len() < new_size {
            let (color, outcome) = sampler.fill(&colors, || free_candidate(rng));
            colors.push(color);
            outcomes.push(outcome);
        }

        let generation = Generation {
            palette: Palette::new(colors),
            outcomes,
            scheme: None,
        };
        tracing::debug!(
            from = palette.len(),
            to = new_size,
            exhausted = generation.exhausted_count(),
            "expanded palette"
        );
        generation
    }

    /// Generates a palette whose leading colors are `pinned`, verbatim.
    ///
    /// `count` is clamped as in [`generate`](Self::generate). Pinned colors
    /// beyond `count` are dropped. The remaining slots come from a fresh
    /// [`generate_with_scheme`](Self::generate_with_scheme) call truncated to
    /// the slots left; those colors are spaced from each other but not from
    /// the pinned colors.
    pub fn generate_with_pinned(
        &self,
        count: usize,
        pinned: &Palette,
        scheme: Option<Scheme>,
        rng: &mut Xorshift64,
    ) -> Generation {
        let count = count.clamp(MIN_PALETTE_LEN, MAX_PALETTE_LEN);
        let mut colors: Vec<Rgb> = pinned.colors.iter().take(count).copied().collect();
        let remaining = count - colors.len();
        if remaining == 0 {
            return Generation::unchanged(Palette::new(colors));
        }

        let Generation {
            palette: fresh,
            mut outcomes,
            scheme,
        } = self.generate_with_scheme(remaining, scheme, rng);
        outcomes.truncate(remaining);
        colors.extend(fresh.colors.into_iter().take(remaining));

        Generation {
            palette: Palette::new(colors),
            outcomes,
            scheme,
        }
    }
}

/// Generator seed for a seeded expand of a palette currently `len` long.
///
/// Offsetting by length keeps expansions of the same palette from different
/// starting sizes from replaying one stream.
pub fn expand_seed(seed: Option<u64>, len: usize) -> Option<u64> {
    seed.map(|s| s.wrapping_add(len as u64))
}

/// Untemplated candidate: any hue, base saturation and value windows.
fn free_candidate(rng: &mut Xorshift64) -> Rgb {
    let h = rng.next_f64();
    let s = rng.next_range(BASE_SATURATION.0, BASE_SATURATION.1);
    let v = rng.next_range(BASE_VALUE.0, BASE_VALUE.1);
    hsv_to_rgb(Hsv { h, s, v })
}
