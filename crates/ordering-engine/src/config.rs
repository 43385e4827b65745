//! Configuration for the ordering engine

use serde::{Deserialize, Serialize};

/// Ordering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Maximum combined length of the sequences in one dense renumber
    pub max_sequence_len: usize,
    /// Generated keys longer than this are logged as a warning (never rejected)
    pub rank_length_warn_threshold: usize,
    /// Maximum length of a neighbor key supplied by a caller
    pub max_rank_input_len: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: 1000,
            rank_length_warn_threshold: 32,
            max_rank_input_len: 255,
        }
    }
}
