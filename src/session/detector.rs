use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::media::MediaFrame;

/// A recognizable gesture: the pictographic symbol plus its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub symbol: &'static str,
    pub label: &'static str,
}

/// The fixed gesture vocabulary the demo detector draws from.
pub const GESTURES: [Gesture; 8] = [
    Gesture { symbol: "✊", label: "A" },
    Gesture { symbol: "👍", label: "B" },
    Gesture { symbol: "👌", label: "C" },
    Gesture { symbol: "👉", label: "D" },
    Gesture { symbol: "🤟", label: "I love you" },
    Gesture { symbol: "✌️", label: "Peace" },
    Gesture { symbol: "👋", label: "Hello" },
    Gesture { symbol: "🤙", label: "Call me" },
];

/// Gesture detector seam
///
/// The session loop only depends on this trait, so the simulated
/// detector below can be swapped for a trained classifier without
/// touching any lifecycle code.
pub trait SignDetector: Send {
    /// Inspect one frame snapshot and report a gesture, if any.
    fn detect(&mut self, frame: &MediaFrame) -> Result<Option<Gesture>>;

    /// Detector name for logging
    fn name(&self) -> &str;
}

/// Simulated detector: a uniform draw against a fixed probability, then
/// a uniform pick from [`GESTURES`]. Frame content is ignored.
pub struct RandomDetector {
    probability: f64,
    rng: StdRng,
}

impl RandomDetector {
    /// `probability` is the per-tick chance of reporting a gesture.
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant for deterministic tests.
    pub fn with_seed(probability: f64, seed: u64) -> Self {
        Self {
            probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SignDetector for RandomDetector {
    fn detect(&mut self, _frame: &MediaFrame) -> Result<Option<Gesture>> {
        if self.rng.gen::<f64>() >= self.probability {
            return Ok(None);
        }

        let pick = self.rng.gen_range(0..GESTURES.len());
        Ok(Some(GESTURES[pick]))
    }

    fn name(&self) -> &str {
        "random"
    }
}
