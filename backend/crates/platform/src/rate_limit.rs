//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions plus an in-memory sliding-window
//! implementation for single-process deployments and tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory sliding-window rate limiter
///
/// Keeps per-key timestamps of accepted requests under one lock; entries
/// older than the window are pruned on every check.
#[derive(Default)]
pub struct MemoryRateLimitStore {
    hits: Mutex<HashMap<String, Vec<i64>>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let window_start = now_ms - config.window_ms();

        let entry = hits.entry(key.to_string()).or_default();
        entry.retain(|&t| t > window_start);

        if entry.len() >= config.max_requests as usize {
            let oldest = entry.first().copied().unwrap_or(now_ms);
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: oldest + config.window_ms(),
            };
        }

        entry.push(now_ms);
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - entry.len() as u32,
            reset_at_ms: now_ms + config.window_ms(),
        }
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_at(key, config, Self::now_ms()))
    }
}
