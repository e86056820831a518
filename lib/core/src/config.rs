use crate::{Error, Result};

/// Tunables for the matching cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Candidates kept from the vector stage
    pub top_k: usize,
    /// Minimum cosine similarity accepted from the vector stage (inclusive)
    pub vector_threshold: f32,
    /// Overlap score the fallback must exceed (exclusive)
    pub fallback_threshold: f32,
    /// Minimum normalized edit similarity for an approximate keyword match
    pub fuzzy_cutoff: f32,
    pub exact_award: f32,
    pub fuzzy_award: f32,
    /// Added to the question keyword count when normalizing overlap, so very
    /// short questions cannot win on a single shared word
    pub length_smoothing: f32,
    /// Confidence reported for fallback matches instead of the raw overlap
    pub fallback_confidence: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            vector_threshold: 0.2,
            fallback_threshold: 0.3,
            fuzzy_cutoff: 0.70,
            exact_award: 1.0,
            fuzzy_award: 0.8,
            length_smoothing: 0.5,
            fallback_confidence: 0.5,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }

        let unit = [
            ("vector_threshold", self.vector_threshold),
            ("fuzzy_cutoff", self.fuzzy_cutoff),
            ("fallback_confidence", self.fallback_confidence),
        ];
        for (name, value) in unit {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("fallback_threshold", self.fallback_threshold),
            ("exact_award", self.exact_award),
            ("fuzzy_award", self.fuzzy_award),
            ("length_smoothing", self.length_smoothing),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MatcherConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            MatcherConfig { top_k: 0, ..Default::default() },
            MatcherConfig { vector_threshold: 1.5, ..Default::default() },
            MatcherConfig { fuzzy_cutoff: f32::NAN, ..Default::default() },
            MatcherConfig { fallback_threshold: -0.1, ..Default::default() },
            MatcherConfig { length_smoothing: f32::INFINITY, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))), "{:?}", config);
        }
    }
}
