use std::time::Duration;

/// Length budgets and truncation ratios for the text pipeline.
#[derive(Debug, Clone)]
pub struct TextLimits {
    /// Maximum headline length in characters.
    pub max_title_len: usize,
    /// Maximum description length on the rewrite path.
    pub max_description_len: usize,
    /// Maximum description length on the plain feed path.
    pub max_feed_description_len: usize,
    /// Minimum share of the budget a sentence boundary must retain.
    pub sentence_min_ratio: f64,
    /// Minimum share of the budget a word boundary must retain.
    pub word_min_ratio: f64,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            max_title_len: 100,
            max_description_len: 500,
            max_feed_description_len: 300,
            sentence_min_ratio: 0.2,
            word_min_ratio: 0.8,
        }
    }
}

/// Identity of the outlet used for attribution and branding stripping.
#[derive(Debug, Clone)]
pub struct OutletConfig {
    /// Display name spliced into the attribution sentence.
    pub attribution_name: String,
    /// Self-referential prefix/suffix stripped from headlines.
    pub site_brand: String,
    /// Lowercase token whose presence counts as existing self-attribution.
    pub marker: String,
}

impl Default for OutletConfig {
    fn default() -> Self {
        Self {
            attribution_name: "WRAL News".to_string(),
            site_brand: "WRAL.com".to_string(),
            marker: "wral".to_string(),
        }
    }
}

/// Knobs for the fan-out/merge stage.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Per-source fetch budget; a timed-out source contributes zero items.
    pub fetch_timeout: Duration,
    /// Cap on the merged, deduplicated result.
    pub max_articles: usize,
    /// Jaccard similarity above which two titles are the same story.
    pub dedup_threshold: f64,
    pub user_agent: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(8),
            max_articles: 30,
            dedup_threshold: 0.8,
            user_agent: "CrimeWireNC/1.0 (+https://fightingcrimenc.com)".to_string(),
        }
    }
}

/// Which rewrite strategy heads the fallback chain. Every mode ends in the
/// local rule-based rewrite, so a rewrite always produces output.
#[derive(Debug, Clone)]
pub enum RewriteMode {
    Local,
    Endpoint {
        url: String,
    },
    Generative {
        api_url: String,
        api_key: String,
        model: String,
    },
}

impl RewriteMode {
    pub const DEFAULT_API_URL: &'static str = "https://api.anthropic.com/v1/messages";
    pub const DEFAULT_MODEL: &'static str = "claude-3-5-sonnet-20241022";

    /// Resolve the mode from the environment. A custom endpoint takes
    /// precedence over the generative API, matching the deployed behavior.
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var("REWRITE_API_URL") {
            if !url.is_empty() {
                return RewriteMode::Endpoint { url };
            }
        }
        match std::env::var("ANTHROPIC_API_KEY") {
            Ok(key) if !key.is_empty() && key != "YOUR_ANTHROPIC_API_KEY" => {
                RewriteMode::Generative {
                    api_url: Self::DEFAULT_API_URL.to_string(),
                    api_key: key,
                    model: Self::DEFAULT_MODEL.to_string(),
                }
            }
            _ => RewriteMode::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_match_frontend_contract() {
        let limits = TextLimits::default();
        assert_eq!(limits.max_title_len, 100);
        assert_eq!(limits.max_description_len, 500);
        assert_eq!(limits.max_feed_description_len, 300);
    }

    #[test]
    fn test_default_aggregator_config() {
        let cfg = AggregatorConfig::default();
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(8));
        assert_eq!(cfg.max_articles, 30);
        assert!(cfg.dedup_threshold > 0.0 && cfg.dedup_threshold < 1.0);
    }
}
