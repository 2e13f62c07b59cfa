/// Config schema types (server, slack, cors).
use {
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
};

/// Default Slack Web API base URL.
pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    pub server: ServerConfig,
    pub slack: SlackConfig,
    pub cors: CorsConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
    /// Free-form environment label shown at startup (`development`, `production`).
    pub environment: String,
    /// IANA time zone used to render check-in clock times. `None` uses the
    /// host's local zone.
    pub timezone: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3001,
            environment: "development".into(),
            timezone: None,
        }
    }
}

impl ServerConfig {
    /// Parse the configured time zone.
    ///
    /// Returns `Ok(None)` when no zone is configured.
    pub fn display_timezone(&self) -> Result<Option<chrono_tz::Tz>, String> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name
                .parse::<chrono_tz::Tz>()
                .map(Some)
                .map_err(|e| format!("unknown time zone '{name}': {e}")),
        }
    }
}

/// Slack workspace settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot user OAuth token (`xoxb-...`).
    pub bot_token: Secret<String>,
    /// Channel whose history and members are exposed.
    pub channel_id: String,
    /// Web API base URL; overridden in tests.
    pub api_base_url: String,
    /// Maximum number of concurrent `users.info` lookups per request.
    pub lookup_concurrency: usize,
    /// Per-request timeout for Slack API calls.
    pub request_timeout_secs: u64,
}

impl SlackConfig {
    /// Whether a non-empty bot token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.bot_token.expose_secret().trim().is_empty()
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: Secret::new(String::new()),
            channel_id: String::new(),
            api_base_url: DEFAULT_SLACK_API_BASE_URL.into(),
            lookup_concurrency: 16,
            request_timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &"[REDACTED]")
            .field("channel_id", &self.channel_id)
            .field("api_base_url", &self.api_base_url)
            .field("lookup_concurrency", &self.lookup_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Cross-origin policy for the dashboard front-end.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The single origin allowed to call the API.
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".into(),
        }
    }
}
