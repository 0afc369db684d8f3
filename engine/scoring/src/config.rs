use serde::{Deserialize, Serialize};

/// Configuration for event scoring and season statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Log skipped rows (not played, unreadable) at info/warn instead of debug
    pub verbose: bool,

    /// Multiplier applied to the event count in the weighted average denominator
    pub weighted_event_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { verbose: false, weighted_event_factor: 0.5 }
    }
}

impl ScoringConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(verbose) = std::env::var("SCORING_VERBOSE") {
            config.verbose = match verbose.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => anyhow::bail!("Invalid SCORING_VERBOSE: {other}"),
            };
        }

        if let Ok(factor) = std::env::var("SCORING_WEIGHTED_EVENT_FACTOR") {
            config.weighted_event_factor = factor
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SCORING_WEIGHTED_EVENT_FACTOR: {factor}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.weighted_event_factor.is_finite() && self.weighted_event_factor > 0.0) {
            anyhow::bail!(
                "weighted_event_factor must be a positive number, got {}",
                self.weighted_event_factor
            );
        }
        Ok(())
    }

    /// `total / (event_count * factor)`, `None` when there are no events
    pub fn weighted_average(&self, total_score: u64, event_count: usize) -> Option<f64> {
        if event_count == 0 {
            return None;
        }
        Some(total_score as f64 / (event_count as f64 * self.weighted_event_factor))
    }
}

/// Round to three decimal places, the precision season averages are reported with
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
