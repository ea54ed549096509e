//! Configuration for reading sessions and the narrative service.

use std::time::Duration;

use tarot_core::DrawOptions;
use tarot_core::draw::DEFAULT_REVERSAL_CHANCE;

/// Shown in place of the synthesis when the narrative request fails.
pub const DEFAULT_FALLBACK_TEXT: &str =
    "The connection to the stars was disturbed. The synthesis is unavailable, \
     but the meanings of your cards still stand.";

const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_TEMPERATURE: f32 = 1.1;
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_LANGUAGE: &str = "Simplified Chinese";

/// Configuration for a reading session.
#[derive(Debug, Clone)]
pub struct ReadingConfig {
    /// RNG seed for reproducible draws; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Probability (0.0-1.0) that a card is dealt reversed.
    pub reversal_chance: f64,
    /// User-visible text for a failed synthesis.
    pub fallback_text: String,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reversal_chance: DEFAULT_REVERSAL_CHANCE,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        }
    }
}

impl ReadingConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the reversal probability (clamped to 0.0-1.0).
    pub fn with_reversal_chance(mut self, chance: f64) -> Self {
        self.reversal_chance = DrawOptions::default()
            .with_reversal_chance(chance)
            .reversal_chance;
        self
    }

    /// Set the fallback text shown when the synthesis fails.
    pub fn with_fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = text.into();
        self
    }

    /// Draw engine options derived from this config.
    pub fn draw_options(&self) -> DrawOptions {
        DrawOptions::default().with_reversal_chance(self.reversal_chance)
    }
}

/// Connection settings for the OpenAI-compatible chat completions service.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// Bearer token; requests fail with `NotConfigured` when absent.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Language the synthesis should be written in.
    pub language: String,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl NarrativeConfig {
    /// Read settings from `TAROT_API_KEY`, `TAROT_API_ENDPOINT`,
    /// `TAROT_MODEL`, and `TAROT_TIMEOUT_MS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_string("TAROT_API_KEY"),
            endpoint: env_string("TAROT_API_ENDPOINT").unwrap_or(defaults.endpoint),
            model: env_string("TAROT_MODEL").unwrap_or(defaults.model),
            timeout: env_u64("TAROT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            ..defaults
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Full URL of the chat completions route.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim().trim_end_matches('/'))
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reading_config() {
        let cfg = ReadingConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.reversal_chance, 0.5);
        assert_eq!(cfg.fallback_text, DEFAULT_FALLBACK_TEXT);
    }

    #[test]
    fn builder_methods() {
        let cfg = ReadingConfig::default()
            .with_seed(123)
            .with_reversal_chance(0.25)
            .with_fallback_text("offline");
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.draw_options().reversal_chance, 0.25);
        assert_eq!(cfg.fallback_text, "offline");
    }

    #[test]
    fn reversal_chance_clamped() {
        assert_eq!(ReadingConfig::default().with_reversal_chance(2.0).reversal_chance, 1.0);
        assert_eq!(ReadingConfig::default().with_reversal_chance(-0.5).reversal_chance, 0.0);
    }

    #[test]
    fn default_narrative_config() {
        let cfg = NarrativeConfig::default();
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.model, "deepseek-chat");
        assert_eq!(cfg.max_tokens, 2000);
        assert_eq!(cfg.timeout, Duration::from_secs(60));
        assert_eq!(
            cfg.completions_url(),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn completions_url_trims_trailing_slash() {
        let cfg = NarrativeConfig::default().with_endpoint("http://localhost:8080/v1/");
        assert_eq!(cfg.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(!NarrativeConfig::default().with_api_key("  ").has_api_key());
        assert!(NarrativeConfig::default().with_api_key("sk-test").has_api_key());
    }
}
