//! Bounded rejection sampling for a single palette slot.
//!
//! A slot moves from sampling to one of two terminal states: `Accepted`
//! once a candidate keeps at least `min_distance` from every neighbor, or
//! `Exhausted` when the attempt budget runs out, in which case the last
//! candidate is kept anyway. Sampling therefore always terminates and always
//! yields a color.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// How a palette slot was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotOutcome {
    /// The candidate drawn on attempt number `attempts` satisfied the
    /// distance constraint.
    Accepted { attempts: usize },
    /// No candidate satisfied the constraint within `attempts` draws; the
    /// last one was kept.
    Exhausted { attempts: usize },
}

impl SlotOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, SlotOutcome::Accepted { .. })
    }

    /// Number of candidates drawn for the slot.
    pub fn attempts(self) -> usize {
        match self {
            SlotOutcome::Accepted { attempts } | SlotOutcome::Exhausted { attempts } => attempts,
        }
    }
}

/// Minimum-distance constraint plus the attempt budget for one slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotSampler {
    pub min_distance: f64,
    pub max_attempts: usize,
}

impl SlotSampler {
    pub fn new(min_distance: f64, max_attempts: usize) -> Self {
        Self {
            min_distance,
            max_attempts,
        }
    }

    /// True if `candidate` is closer than `min_distance` to any neighbor.
    pub fn too_close(&self, candidate: Rgb, neighbors: &[Rgb]) -> bool {
        neighbors
            .iter()
            .any(|&n| candidate.distance(n) < self.min_distance)
    }

    /// Draws candidates until one clears every neighbor or the budget runs
    /// out. At least one candidate is always drawn.
    pub fn fill<F>(&self, neighbors: &[Rgb], mut draw: F) -> (Rgb, SlotOutcome)
    where
        F: FnMut() -> Rgb,
    {
        let budget = self.max_attempts.max(1);
        let mut attempts = 0;
        loop {
            let candidate = draw();
            attempts += 1;
            if !self.too_close(candidate, neighbors) {
                return (candidate, SlotOutcome::Accepted { attempts });
            }
            if attempts >= budget {
                tracing::debug!(
                    attempts,
                    min_distance = self.min_distance,
                    color = %candidate,
                    "slot sampling exhausted, keeping last candidate"
                );
                return (candidate, SlotOutcome::Exhausted { attempts });
            }
        }
    }
}
