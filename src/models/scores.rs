use serde::Serialize;

use crate::utils::maths_utils::clamp_signed_unit;

/// The five normalized component scores feeding the overall decision score.
/// Field names are part of the boundary contract with the consuming UI, so
/// they serialize verbatim.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentScores {
    pub technical: f64,
    pub sentiment: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub volume: f64,
}

impl ComponentScores {
    /// Every score clamped into [-1, 1]; applied once before the decision
    /// stage so no caller can smuggle an out-of-range component through.
    pub fn clamped(self) -> Self {
        ComponentScores {
            technical: clamp_signed_unit(self.technical),
            sentiment: clamp_signed_unit(self.sentiment),
            momentum: clamp_signed_unit(self.momentum),
            volatility: clamp_signed_unit(self.volatility),
            volume: clamp_signed_unit(self.volume),
        }
    }
}
