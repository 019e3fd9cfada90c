//! Shared types for the HTTP layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::{AppConfig, TRANSLATE_MAX_REQUESTS, TRANSLATE_WINDOW};
use crate::pipeline::persona::{LlmClient, PersonaPipeline, PersonaPrompts};

/// Above this many tracked clients, stale windows are dropped.
const MAX_TRACKED_CLIENTS: usize = 10_000;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
///
/// The LLM client and persona prompts are immutable after start-up; only
/// the rate limiters carry mutable state.
#[derive(Clone)]
pub struct ApiContext {
    pub llm: Arc<dyn LlmClient>,
    pub prompts: Arc<PersonaPrompts>,
    pub api_key_configured: bool,
    pub general_limiter: Arc<Mutex<RateLimiter>>,
    pub translate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PersonaPrompts, config: &AppConfig) -> Self {
        Self {
            llm,
            prompts: Arc::new(prompts),
            api_key_configured: config.api_key_configured(),
            general_limiter: Arc::new(Mutex::new(RateLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window,
            ))),
            translate_limiter: Arc::new(Mutex::new(RateLimiter::new(
                TRANSLATE_MAX_REQUESTS,
                TRANSLATE_WINDOW,
            ))),
        }
    }

    /// Pipeline borrowing this context's client and prompts.
    pub fn pipeline(&self) -> PersonaPipeline<'_> {
        PersonaPipeline::new(self.llm.as_ref(), &self.prompts)
    }
}

// ═══════════════════════════════════════════════════════════
// Rate limiter — per-client sliding window
// ═══════════════════════════════════════════════════════════

/// Per-client sliding-window rate limiter.
pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: HashMap::new(),
            max_requests,
            window,
        }
    }

    /// Record a request for `client` if it is within limits. Returns
    /// `Err(retry_after_secs)` when the window is full.
    pub fn check(&mut self, client: &str) -> Result<(), u64> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&mut self, client: &str, now: Instant) -> Result<(), u64> {
        let window = self.window;
        if self.windows.len() > MAX_TRACKED_CLIENTS {
            self.windows.retain(|_, entries| {
                entries.retain(|ts| now.duration_since(*ts) < window);
                !entries.is_empty()
            });
        }

        let entries = self.windows.entry(client.to_string()).or_default();
        entries.retain(|ts| now.duration_since(*ts) < window);

        if entries.len() as u32 >= self.max_requests {
            let retry_after = entries
                .first()
                .map(|oldest| window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(window);
            return Err(retry_after.as_secs().max(1));
        }

        entries.push(now);
        Ok(())
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit() {
        let mut limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_err());
    }

    #[test]
    fn clients_are_independent() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("b").is_ok());
        assert!(limiter.check("a").is_err());
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn window_slides() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("a", start).is_ok());
        assert!(limiter.check_at("a", start + Duration::from_secs(30)).is_err());
        assert!(limiter.check_at("a", start + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn retry_after_counts_down_to_oldest_expiry() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(300));
        let start = Instant::now();
        limiter.check_at("a", start).unwrap();
        let retry = limiter
            .check_at("a", start + Duration::from_secs(100))
            .unwrap_err();
        assert_eq!(retry, 200);
    }

    #[test]
    fn retry_after_is_at_least_one_second() {
        let mut limiter = RateLimiter::new(1, Duration::from_millis(500));
        let start = Instant::now();
        limiter.check_at("a", start).unwrap();
        assert_eq!(limiter.check_at("a", start).unwrap_err(), 1);
    }

    #[test]
    fn rejected_requests_are_not_recorded() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        limiter.check_at("a", start).unwrap();
        for s in 1..10 {
            let _ = limiter.check_at("a", start + Duration::from_secs(s));
        }
        // Only the first request occupies the window.
        assert!(limiter.check_at("a", start + Duration::from_secs(60)).is_ok());
    }
}
