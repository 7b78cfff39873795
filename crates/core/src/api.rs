//! String-level entry points for hosts that speak hex strings.
//!
//! These wrap [`PaletteEngine`] and [`Deficiency`] with the coercions and
//! fallbacks existing callers rely on: counts are clamped to
//! 2..=[`MAX_PALETTE_LEN`], an unknown deficiency kind on a single color is
//! a passthrough, and every color the engine produces is lowercase
//! `#rrggbb`. Colors the caller supplied and the engine kept (locked, pinned
//! or pre-existing) come back as the caller's own strings.
//! Each call builds its own generator from `seed`, or from OS entropy when
//! `seed` is `None`.
//!
//! Seeded output is reproducible within this crate only; it does not match
//! palettes produced by other implementations from the same seed.

use crate::color::Rgb;
use crate::cvd::Deficiency;
use crate::error::HueError;
use crate::palette::{expand_seed, Palette, PaletteEngine, MAX_PALETTE_LEN};
use crate::prng::Xorshift64;
use std::collections::HashSet;

/// Generates `count` colors with the default engine.
///
/// Negative counts and counts below 2 yield 2 colors; counts above
/// [`MAX_PALETTE_LEN`] yield that many.
pub fn generate_palette(count: i64, seed: Option<u64>) -> Vec<String> {
    let count = usize::try_from(count).unwrap_or(0);
    let mut rng = Xorshift64::from_seed(seed);
    PaletteEngine::default()
        .generate(count, &mut rng)
        .palette
        .to_hex()
}

/// Replaces every color not listed in `locked`.
///
/// Locked colors are returned byte-for-byte as given. Fails only if a
/// palette color is malformed.
pub fn regenerate_unlocked<S: AsRef<str>>(
    palette: &[S],
    locked: &[usize],
    seed: Option<u64>,
) -> Result<Vec<String>, HueError> {
    let parsed = Palette::from_hex(palette)?;
    let mut rng = Xorshift64::from_seed(seed);
    let generation = PaletteEngine::default().regenerate(&parsed, locked, &mut rng);
    let locked: HashSet<usize> = locked.iter().copied().collect();
    Ok(splice(palette, &generation.palette, |i| locked.contains(&i)))
}

/// Appends colors until the palette holds `new_size` entries.
///
/// A `new_size` at or below the current length returns the input strings
/// unchanged. A negative `new_size`, or one above [`MAX_PALETTE_LEN`], is
/// rejected. The existing colors keep their original strings. A seeded call
/// draws from `seed + palette.len()`, so expanding the same palette from
/// different starting sizes does not replay one stream.
pub fn expand_palette<S: AsRef<str>>(
    palette: &[S],
    new_size: i64,
    seed: Option<u64>,
) -> Result<Vec<String>, HueError> {
    let new_size = usize::try_from(new_size).map_err(|_| {
        HueError::invalid_parameter("new_size", format!("must be non-negative, got {new_size}"))
    })?;
    let parsed = Palette::from_hex(palette)?;
    if new_size <= parsed.len() {
        return Ok(palette.iter().map(|s| s.as_ref().to_string()).collect());
    }
    if new_size > MAX_PALETTE_LEN {
        return Err(HueError::invalid_parameter(
            "new_size",
            format!("must be at most {MAX_PALETTE_LEN}, got {new_size}"),
        ));
    }
    let mut rng = Xorshift64::from_seed(expand_seed(seed, parsed.len()));
    let generation = PaletteEngine::default().expand(&parsed, new_size, &mut rng);
    Ok(splice(palette, &generation.palette, |i| i < palette.len()))
}

/// Generates `count` colors whose leading entries are `pinned`, verbatim.
///
/// `count` is coerced as in [`generate_palette`].
pub fn generate_with_pinned<S: AsRef<str>>(
    count: i64,
    pinned: &[S],
    seed: Option<u64>,
) -> Result<Vec<String>, HueError> {
    let count = usize::try_from(count).unwrap_or(0);
    let parsed = Palette::from_hex(pinned)?;
    let mut rng = Xorshift64::from_seed(seed);
    let generation =
        PaletteEngine::default().generate_with_pinned(count, &parsed, None, &mut rng);
    Ok(splice(pinned, &generation.palette, |i| i < pinned.len()))
}

/// The caller's string at each index where `keep` holds, the engine's color
/// as lowercase hex everywhere else.
fn splice<S: AsRef<str>>(
    input: &[S],
    output: &Palette,
    keep: impl Fn(usize) -> bool,
) -> Vec<String> {
    output
        .iter()
        .enumerate()
        .map(|(i, c)| match input.get(i) {
            Some(given) if keep(i) => given.as_ref().to_string(),
            _ => c.to_hex(),
        })
        .collect()
}

/// Simulates one color under `kind` (case-insensitive).
///
/// An unrecognized `kind` returns the input color unchanged. A malformed
/// color is an error regardless of `kind`.
pub fn simulate_deficiency(color: &str, kind: &str) -> Result<String, HueError> {
    let rgb = Rgb::from_hex(color)?;
    let out = match Deficiency::parse(kind) {
        Some(deficiency) => deficiency.simulate(rgb),
        None => {
            tracing::debug!(kind, "unknown deficiency kind, passing color through");
            rgb
        }
    };
    Ok(out.to_hex())
}

/// Simulates every color of a palette under `kind`.
///
/// Unlike [`simulate_deficiency`], an unrecognized `kind` is an error here.
pub fn simulate_palette<S: AsRef<str>>(palette: &[S], kind: &str) -> Result<Vec<String>, HueError> {
    let deficiency: Deficiency = kind.parse()?;
    let palette = Palette::from_hex(palette)?;
    Ok(deficiency.simulate_palette(&palette).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<&'static str> {
        vec!["#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51"]
    }

    fn is_canonical_hex(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..].bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    // -- generate_palette --

    #[test]
    fn generate_palette_outputs_canonical_hex() {
        let p = generate_palette(6, Some(1));
        assert_eq!(p.len(), 6);
        assert!(p.iter().all(|c| is_canonical_hex(c)), "{p:?}");
    }

    #[test]
    fn generate_palette_clamps_small_and_negative_counts() {
        assert_eq!(generate_palette(1, Some(1)).len(), 2);
        assert_eq!(generate_palette(0, Some(1)).len(), 2);
        assert_eq!(generate_palette(-7, Some(1)).len(), 2);
    }

    #[test]
    fn generate_palette_caps_huge_counts() {
        assert_eq!(generate_palette(i64::MAX, Some(1)).len(), MAX_PALETTE_LEN);
    }

    #[test]
    fn generate_palette_same_seed_same_output() {
        assert_eq!(generate_palette(5, Some(42)), generate_palette(5, Some(42)));
    }

    #[test]
    fn generate_palette_unseeded_calls_differ() {
        assert_ne!(generate_palette(5, None), generate_palette(5, None));
    }

    // -- regenerate_unlocked --

    #[test]
    fn regenerate_unlocked_keeps_locked_indices() {
        let input = sample();
        let out = regenerate_unlocked(&input, &[0, 2], Some(3)).unwrap();
        assert_eq!(out.len(), input.len());
        assert_eq!(out[0], input[0]);
        assert_eq!(out[2], input[2]);
    }

    #[test]
    fn regenerate_unlocked_returns_locked_strings_verbatim() {
        let input = ["#ABCDEF", "#123456", "FF00AA"];
        let out = regenerate_unlocked(&input, &[0, 2], Some(3)).unwrap();
        assert_eq!(out[0], "#ABCDEF");
        assert_eq!(out[2], "FF00AA");
        assert!(is_canonical_hex(&out[1]), "{}", out[1]);
    }

    #[test]
    fn regenerate_unlocked_everything_locked_is_identity() {
        let input = ["#ABCDEF", "123456"];
        assert_eq!(regenerate_unlocked(&input, &[0, 1], None).unwrap(), input);
    }

    #[test]
    fn regenerate_unlocked_rejects_malformed_color() {
        let err = regenerate_unlocked(&["#ffffff", "oops"], &[0], None).unwrap_err();
        assert!(err.is_invalid_input());
    }

    // -- expand_palette --

    #[test]
    fn expand_palette_same_or_smaller_size_is_unchanged() {
        let input = sample();
        assert_eq!(expand_palette(&input, 5, Some(1)).unwrap(), input);
        assert_eq!(expand_palette(&input, 2, Some(1)).unwrap(), input);
        assert_eq!(expand_palette(&input, 0, Some(1)).unwrap(), input);
    }

    #[test]
    fn expand_palette_appends_new_colors() {
        let input = sample();
        let out = expand_palette(&input, 7, Some(1)).unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(&out[..5], &input[..]);
        assert!(out[5..].iter().all(|c| is_canonical_hex(c)));
    }

    #[test]
    fn expand_palette_keeps_input_strings_verbatim() {
        let input = ["#ABCDEF", "123456"];
        assert_eq!(expand_palette(&input, 2, Some(3)).unwrap(), input);
        let out = expand_palette(&input, 4, Some(3)).unwrap();
        assert_eq!(&out[..2], &input[..]);
        assert!(out[2..].iter().all(|c| is_canonical_hex(c)));
    }

    #[test]
    fn expand_palette_rejects_oversized_target() {
        let err = expand_palette(&sample(), i64::MAX, Some(1)).unwrap_err();
        assert!(matches!(err, HueError::InvalidParameter { ref name, .. } if name == "new_size"));
        let at_cap = expand_palette(&sample(), MAX_PALETTE_LEN as i64, Some(1));
        assert_eq!(at_cap.unwrap().len(), MAX_PALETTE_LEN);
    }

    #[test]
    fn expand_palette_rejects_negative_size() {
        let err = expand_palette(&sample(), -1, None).unwrap_err();
        assert!(matches!(err, HueError::InvalidParameter { ref name, .. } if name == "new_size"));
    }

    #[test]
    fn expand_palette_offsets_seed_by_length() {
        // Seed 10 on a 2-color palette draws from generator seed 12.
        let two = expand_palette(&["#000000", "#ffffff"], 3, Some(10)).unwrap();
        let engine = PaletteEngine::default();
        let base = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        let direct = engine
            .expand(&base, 3, &mut Xorshift64::new(12))
            .palette
            .to_hex();
        assert_eq!(two, direct);
    }

    // -- generate_with_pinned --

    #[test]
    fn generate_with_pinned_keeps_prefix_verbatim() {
        let out = generate_with_pinned(4, &["#FF0000", "00ff00"], Some(2)).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], "#FF0000");
        assert_eq!(out[1], "00ff00");
        assert!(out[2..].iter().all(|c| is_canonical_hex(c)));
    }

    #[test]
    fn generate_with_pinned_drops_pins_beyond_count() {
        let out = generate_with_pinned(2, &["#AA0000", "#00AA00", "#0000AA"], None).unwrap();
        assert_eq!(out, vec!["#AA0000", "#00AA00"]);
    }

    #[test]
    fn generate_with_pinned_rejects_malformed_pin() {
        assert!(generate_with_pinned(4, &["#ff00"], Some(2)).is_err());
    }

    // -- simulate_deficiency --

    #[test]
    fn simulate_deficiency_reference_outputs() {
        assert_eq!(simulate_deficiency("#ff0000", "protanopia").unwrap(), "#00fe00");
        assert_eq!(simulate_deficiency("#ff0000", "deuteranopia").unwrap(), "#fe0034");
        assert_eq!(simulate_deficiency("#ff0000", "tritanopia").unwrap(), "#fb2c00");
    }

    #[test]
    fn simulate_deficiency_kind_is_case_insensitive() {
        assert_eq!(
            simulate_deficiency("FF0000", "ProtanOPIA").unwrap(),
            simulate_deficiency("#ff0000", "protanopia").unwrap()
        );
    }

    #[test]
    fn simulate_deficiency_unknown_kind_passes_through() {
        assert_eq!(simulate_deficiency("#3a7bd5", "unknown_kind").unwrap(), "#3a7bd5");
    }

    #[test]
    fn simulate_deficiency_rejects_malformed_color() {
        assert!(simulate_deficiency("#3a7bd", "protanopia").is_err());
        assert!(simulate_deficiency("#3a7bd", "unknown_kind").is_err());
    }

    // -- simulate_palette --

    #[test]
    fn simulate_palette_maps_every_color() {
        let out = simulate_palette(&["#ff0000", "#000000"], "protanopia").unwrap();
        assert_eq!(out, vec!["#00fe00", "#000000"]);
    }

    #[test]
    fn simulate_palette_rejects_unknown_kind() {
        let err = simulate_palette(&["#ff0000"], "sepia").unwrap_err();
        assert_eq!(err, HueError::UnknownDeficiency("sepia".into()));
    }
}
