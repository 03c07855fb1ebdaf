use serde_derive::{Deserialize, Serialize};

use super::direction_encoder::Encoding;

// Largest total cost still accepted as a match; chosen empirically
pub const DEFAULT_THRESHOLD: f32 = 1200f32;

/// Matcher settings.
///
/// Every field has a default, so a JSON config only needs the values it changes:
///
/// ```json
/// { "threshold": 900, "encoding": "compass" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    // Maximum accepted total cost over all strokes
    pub threshold: f32,
    // How raw strokes become direction sequences
    pub encoding: Encoding,
}

impl Default for MatcherConfig {
    fn default() -> MatcherConfig {
        MatcherConfig {
            threshold: DEFAULT_THRESHOLD,
            encoding: Encoding::Degrees,
        }
    }
}

impl MatcherConfig {
    pub fn from_json(json: &str) -> Result<MatcherConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_threshold(mut self, threshold: f32) -> MatcherConfig {
        self.threshold = threshold;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> MatcherConfig {
        self.encoding = encoding;
        self
    }
}
