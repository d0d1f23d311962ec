use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_CONTENT_LANGUAGE: &str = "Modern Standard Arabic";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the generation service, read from the
/// environment (and `.env` when present).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewaySettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub search_model: String,
    pub quiz_model: String,
    /// Language the generated lessons and questions are written in.
    pub content_language: String,
    pub timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_model: DEFAULT_MODEL.to_string(),
            quiz_model: DEFAULT_MODEL.to_string(),
            content_language: DEFAULT_CONTENT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewaySettings {
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            log::debug!("no .env loaded: {err}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the settings from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let timeout = get("EXAMIAI_TIMEOUT_SECS")
            .and_then(|v| match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    log::warn!("ignoring invalid EXAMIAI_TIMEOUT_SECS={v}");
                    None
                }
            })
            .unwrap_or(defaults.timeout);

        Self {
            api_key: get("EXAMIAI_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            endpoint: get("EXAMIAI_GATEWAY_ENDPOINT")
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            search_model: get("EXAMIAI_SEARCH_MODEL").unwrap_or(defaults.search_model),
            quiz_model: get("EXAMIAI_QUIZ_MODEL").unwrap_or(defaults.quiz_model),
            content_language: get("EXAMIAI_CONTENT_LANGUAGE").unwrap_or(defaults.content_language),
            timeout,
        }
    }
}
