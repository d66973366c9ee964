//! Application Configuration

use std::time::Duration;

use platform::rate_limit::RateLimitConfig;

/// Chat application configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Model name sent to the provider
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap per completion
    pub max_output_tokens: u32,
    /// Total attempts per request (first try included)
    pub max_attempts: u32,
    /// Backoff base; attempt n waits base * 2^(n-1)
    pub retry_base_delay: Duration,
    /// Per-user throttle for the chat endpoint
    pub rate_limit: RateLimitConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_output_tokens: 2000,
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ChatConfig {
    /// Config for tests: no backoff delay
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            retry_base_delay: Duration::ZERO,
            ..Default::default()
        }
    }
}
