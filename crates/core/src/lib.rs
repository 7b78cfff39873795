#![deny(unsafe_code)]
//! Core color engine for HueVault.
//!
//! Two independent, side-effect-free components:
//!
//! - the palette engine ([`PaletteEngine`]): generates, regenerates and
//!   expands palettes of visually distinct colors using hue [`Scheme`]s and
//!   bounded rejection sampling;
//! - the deficiency simulator ([`Deficiency`]): approximates how a color
//!   appears under protanopia, deuteranopia or tritanopia.
//!
//! [`api`] exposes both over hex strings.

pub mod api;
pub mod color;
pub mod config;
pub mod cvd;
pub mod error;
pub mod palette;
pub mod prng;
pub mod sampler;
pub mod scheme;

pub use color::{Hsv, LinearRgb, Rgb};
pub use config::EngineConfig;
pub use cvd::{Deficiency, Lms};
pub use error::HueError;
pub use palette::{Generation, Palette, PaletteEngine};
pub use prng::Xorshift64;
pub use sampler::SlotOutcome;
pub use scheme::Scheme;
