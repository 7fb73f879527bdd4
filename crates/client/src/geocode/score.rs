//! Confidence scoring for provider candidates.
//!
//! A tunable heuristic, not ground truth. The weights below are what the
//! acceptance thresholds in the resolution chain are calibrated against:
//!
//! - start at [`BASE_SCORE`]
//! - add up to [`MAX_TOKEN_BONUS`] for the share of query tokens (length
//!   >= [`MIN_TOKEN_LEN`]) that overlap a token of the candidate label
//! - subtract [`VILLAGE_PENALTY`] for generic village-level matches
//! - add `importance * IMPORTANCE_MULTIPLIER` when the provider reports it
//! - clamp to 0..=100

use crate::provider::Candidate;

pub const BASE_SCORE: f64 = 50.0;
pub const MAX_TOKEN_BONUS: f64 = 40.0;
pub const VILLAGE_PENALTY: f64 = 10.0;
pub const IMPORTANCE_MULTIPLIER: f64 = 10.0;
pub const MIN_TOKEN_LEN: usize = 3;

/// Weights used by [`ScoringWeights::score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub base: f64,
    pub max_token_bonus: f64,
    pub village_penalty: f64,
    pub importance_multiplier: f64,
    pub min_token_len: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: BASE_SCORE,
            max_token_bonus: MAX_TOKEN_BONUS,
            village_penalty: VILLAGE_PENALTY,
            importance_multiplier: IMPORTANCE_MULTIPLIER,
            min_token_len: MIN_TOKEN_LEN,
        }
    }
}

impl ScoringWeights {
    /// Rate `candidate` against the query text that produced it.
    pub fn score(&self, candidate: &Candidate, query: &str) -> u8 {
        let wanted = self.tokens(query);
        let offered = self.tokens(&candidate.display_name);

        let mut score = self.base;

        if !wanted.is_empty() {
            let matched = wanted
                .iter()
                .filter(|w| offered.iter().any(|o| o.contains(w.as_str()) || w.contains(o.as_str())))
                .count();
            score += matched as f64 / wanted.len() as f64 * self.max_token_bonus;
        }

        if candidate.is_village() {
            score -= self.village_penalty;
        }

        if let Some(importance) = candidate.importance {
            score += importance * self.importance_multiplier;
        }

        score.clamp(0.0, 100.0).round() as u8
    }

    fn tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| t.chars().count() >= self.min_token_len)
            .map(str::to_string)
            .collect()
    }
}
