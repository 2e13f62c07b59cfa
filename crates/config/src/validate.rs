//! Semantic validation of a loaded [`VillageConfig`].
//!
//! A missing Slack token or channel is only a warning: the server still
//! starts and the first Slack call reports the problem.

use crate::schema::VillageConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "slack.channel_id"
    pub path: &'static str,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.path, self.message)
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path,
            message: message.into(),
        });
    }
}

/// Validate a fully merged configuration.
#[must_use]
pub fn validate(config: &VillageConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !config.slack.has_token() {
        result.push(
            Severity::Warning,
            "slack.bot_token",
            "no bot token configured (set SLACK_BOT_TOKEN); Slack calls will fail",
        );
    }
    if config.slack.channel_id.trim().is_empty() {
        result.push(
            Severity::Warning,
            "slack.channel_id",
            "no channel configured (set SLACK_CHANNEL_ID); Slack calls will fail",
        );
    }
    if config.slack.lookup_concurrency == 0 {
        result.push(
            Severity::Error,
            "slack.lookup_concurrency",
            "must be at least 1",
        );
    }
    if config.slack.request_timeout_secs == 0 {
        result.push(
            Severity::Error,
            "slack.request_timeout_secs",
            "must be at least 1",
        );
    }
    if let Err(e) = url::Url::parse(&config.slack.api_base_url) {
        result.push(
            Severity::Error,
            "slack.api_base_url",
            format!("invalid URL '{}': {e}", config.slack.api_base_url),
        );
    }
    if let Err(message) = config.server.display_timezone() {
        result.push(Severity::Error, "server.timezone", message);
    }
    if let Err(message) = check_origin(&config.cors.allowed_origin) {
        result.push(Severity::Error, "cors.allowed_origin", message);
    }

    result
}

/// An origin is `scheme://host[:port]` with no path, query or fragment.
fn check_origin(origin: &str) -> Result<(), String> {
    let url = url::Url::parse(origin).map_err(|e| format!("invalid origin '{origin}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("origin '{origin}' must use http or https"));
    }
    if url.host_str().is_none() {
        return Err(format!("origin '{origin}' has no host"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() || origin.ends_with('/')
    {
        return Err(format!(
            "origin '{origin}' must not carry a path, query or trailing slash"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;

    use super::*;

    fn complete_config() -> VillageConfig {
        let mut cfg = VillageConfig::default();
        cfg.slack.bot_token = Secret::new("xoxb-1".into());
        cfg.slack.channel_id = "C01".into();
        cfg
    }

    #[test]
    fn complete_config_is_clean() {
        let result = validate(&complete_config());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn missing_credentials_are_warnings() {
        let result = validate(&VillageConfig::default());
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 2);
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.path == "slack.bot_token")
        );
    }

    #[test]
    fn zero_concurrency_is_error() {
        let mut cfg = complete_config();
        cfg.slack.lookup_concurrency = 0;
        let result = validate(&cfg);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "slack.lookup_concurrency");
    }

    #[test]
    fn unknown_timezone_is_error() {
        let mut cfg = complete_config();
        cfg.server.timezone = Some("Nowhere/Land".into());
        assert!(validate(&cfg).has_errors());
    }

    #[test]
    fn origin_with_path_is_error() {
        let mut cfg = complete_config();
        cfg.cors.allowed_origin = "http://localhost:3000/app".into();
        let result = validate(&cfg);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "cors.allowed_origin");
    }

    #[test]
    fn origin_checks() {
        assert!(check_origin("http://localhost:3000").is_ok());
        assert!(check_origin("https://village.example.org").is_ok());
        assert!(check_origin("https://village.example.org/").is_err());
        assert!(check_origin("ftp://village.example.org").is_err());
        assert!(check_origin("not an origin").is_err());
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic {
            severity: Severity::Warning,
            path: "slack.channel_id",
            message: "missing".into(),
        };
        assert_eq!(d.to_string(), "warning [slack.channel_id]: missing");
    }
}
