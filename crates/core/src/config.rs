//! Tunable constants for the palette engine.
//!
//! The defaults (distance 25.0, 1000 attempts for fresh palettes, 500 for
//! regenerate/expand) are the values existing callers expect; changing them
//! changes seeded output.

use crate::error::HueError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default minimum RGB Euclidean distance between palette colors.
pub const DEFAULT_MIN_DISTANCE: f64 = 25.0;
/// Default attempt budget per slot for `generate`.
pub const DEFAULT_GENERATE_ATTEMPTS: usize = 1000;
/// Default attempt budget per slot for `regenerate` and `expand`.
pub const DEFAULT_REFILL_ATTEMPTS: usize = 500;

/// Palette engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum RGB distance a candidate must keep from its neighbors.
    pub min_distance: f64,
    /// Attempt budget per slot when generating a fresh palette.
    pub generate_attempts: usize,
    /// Attempt budget per slot when regenerating or expanding.
    pub refill_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            generate_attempts: DEFAULT_GENERATE_ATTEMPTS,
            refill_attempts: DEFAULT_REFILL_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Extracts configuration from a JSON object, falling back to defaults
    /// for missing or mistyped keys. Call [`EngineConfig::validate`] on the
    /// result before use.
    pub fn from_json(params: &Value) -> Self {
        Self {
            min_distance: number(params, "min_distance", DEFAULT_MIN_DISTANCE),
            generate_attempts: count(params, "generate_attempts", DEFAULT_GENERATE_ATTEMPTS),
            refill_attempts: count(params, "refill_attempts", DEFAULT_REFILL_ATTEMPTS),
        }
    }

    /// Rejects values the sampler cannot honor.
    pub fn validate(&self) -> Result<(), HueError> {
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(HueError::invalid_parameter(
                "min_distance",
                format!("must be a finite non-negative number, got {}", self.min_distance),
            ));
        }
        if self.generate_attempts == 0 {
            return Err(HueError::invalid_parameter("generate_attempts", "must be at least 1"));
        }
        if self.refill_attempts == 0 {
            return Err(HueError::invalid_parameter("refill_attempts", "must be at least 1"));
        }
        Ok(())
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "min_distance": self.min_distance,
            "generate_attempts": self.generate_attempts,
            "refill_attempts": self.refill_attempts,
        })
    }

    /// Schema describing every tunable, its type, and its default.
    pub fn schema() -> Value {
        json!({
            "min_distance": {
                "type": "number",
                "default": DEFAULT_MIN_DISTANCE,
                "min": 0.0,
                "max": 441.7,
                "description": "Minimum RGB Euclidean distance between palette colors"
            },
            "generate_attempts": {
                "type": "integer",
                "default": DEFAULT_GENERATE_ATTEMPTS,
                "min": 1,
                "description": "Candidates drawn per slot before keeping the last one (generate)"
            },
            "refill_attempts": {
                "type": "integer",
                "default": DEFAULT_REFILL_ATTEMPTS,
                "min": 1,
                "description": "Candidates drawn per slot before keeping the last one (regenerate, expand)"
            }
        })
    }
}

/// `params[name]` as f64, or `default` when missing or not a number.
fn number(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as usize, or `default` when missing or not a non-negative
/// integer.
fn count(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}
