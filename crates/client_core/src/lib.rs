use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::Client;
use shared::protocol::{RecommendRequest, RecommendResponse, DEFAULT_TOP_K};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod presenter;

pub use error::QueryError;

/// Prompt submitted automatically at startup when the user supplies none.
pub const DEFAULT_PROMPT: &str =
    "Urban arterial near a school zone with frequent pedestrian crashes, operating speeds around 45 km/h";

/// Canned site descriptions offered as one-keystroke shortcuts.
pub const QUICK_PROMPTS: [&str; 4] = [
    "Rural highway with sharp curves and frequent run-off-road crashes at 80 km/h",
    "Urban intersection with high angle crashes and red-light running",
    "Suburban corridor near schools with speeding and pedestrian conflicts",
    "Two-lane road with overtaking crashes and poor sight distance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

struct SessionState {
    prompt: String,
    phase: QueryPhase,
    last_response: Option<RecommendResponse>,
    last_error: Option<String>,
    submit_seq: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        // Fresh sessions carry the sample prompt, matching what the
        // front end shows before the first submit.
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            phase: QueryPhase::Idle,
            last_response: None,
            last_error: None,
            submit_seq: 0,
        }
    }
}

/// Point-in-time copy of the query session, cloned out for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub prompt: String,
    pub phase: QueryPhase,
    pub last_response: Option<RecommendResponse>,
    pub last_error: Option<String>,
}

pub struct RecommendClient {
    http: Client,
    backend_base: String,
    top_k: u32,
    inner: Mutex<SessionState>,
}

impl RecommendClient {
    pub fn new(backend_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            backend_base: backend_base.into(),
            top_k: DEFAULT_TOP_K,
            inner: Mutex::new(SessionState::default()),
        }
    }

    pub fn new_with_options(
        backend_base: impl Into<String>,
        top_k: u32,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            backend_base: backend_base.into(),
            top_k,
            inner: Mutex::new(SessionState::default()),
        })
    }

    pub fn backend_base(&self) -> &str {
        &self.backend_base
    }

    /// Runs one query cycle for `prompt` and commits the outcome into the
    /// session. Blank prompts are ignored without touching any state. A
    /// failure records the error message but keeps the previous response,
    /// so a failed retry still has results to show. When submits overlap,
    /// only the newest one may commit; completions of superseded submits
    /// are discarded.
    pub async fn submit(&self, prompt: &str) {
        if prompt.trim().is_empty() {
            debug!("recommend: blank prompt ignored");
            return;
        }

        let token = {
            let mut guard = self.inner.lock().await;
            guard.submit_seq += 1;
            guard.prompt = prompt.to_string();
            guard.phase = QueryPhase::Loading;
            guard.last_error = None;
            guard.submit_seq
        };

        info!(token, top_k = self.top_k, "recommend: query started");
        let started = Instant::now();
        let outcome = self.fetch_recommendations(prompt).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let mut guard = self.inner.lock().await;
        if token != guard.submit_seq {
            debug!(
                token,
                newest = guard.submit_seq,
                "recommend: stale completion discarded"
            );
            return;
        }

        match outcome {
            Ok(response) => {
                info!(
                    token,
                    elapsed_ms,
                    items = response.items.len(),
                    "recommend: query succeeded"
                );
                guard.last_response = Some(response);
                guard.last_error = None;
                guard.phase = QueryPhase::Success;
            }
            Err(err) => {
                warn!(token, elapsed_ms, error = %err, "recommend: query failed");
                guard.last_error = Some(err.to_string());
                guard.phase = QueryPhase::Error;
            }
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let guard = self.inner.lock().await;
        SessionSnapshot {
            prompt: guard.prompt.clone(),
            phase: guard.phase,
            last_response: guard.last_response.clone(),
            last_error: guard.last_error.clone(),
        }
    }

    async fn fetch_recommendations(&self, prompt: &str) -> Result<RecommendResponse, QueryError> {
        let response = self
            .http
            .post(format!("{}/recommendations", self.backend_base))
            .json(&RecommendRequest {
                prompt: prompt.to_string(),
                top_k: self.top_k,
            })
            .send()
            .await
            .map_err(|err| QueryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| QueryError::Transport(err.to_string()))?;

        serde_json::from_str(&body).map_err(|err| QueryError::Parse(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
