use std::collections::HashMap;

use anyhow::{bail, Context};
use url::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = std::fs::read_to_string("recommender.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("backend_url") {
                settings.backend_url = v.clone();
            }
            if let Some(v) = file_cfg.get("request_timeout_secs") {
                if let Ok(parsed) = v.parse::<u64>() {
                    settings.request_timeout_secs = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Ok(v) = std::env::var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

/// Validates a backend base URL and strips any trailing slash so request
/// paths can be appended uniformly.
pub fn resolve_backend_base(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Settings::default().backend_url);
    }

    let parsed = Url::parse(raw).with_context(|| format!("invalid backend url '{raw}'"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        bail!("backend url '{raw}' must use http or https");
    }

    Ok(raw.trim_end_matches('/').to_string())
}
