use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
    village_common::{Error, Result},
};

use crate::{env_subst::substitute_env, schema::VillageConfig};

village_common::impl_context!();

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "village.toml",
    "village.yaml",
    "village.yml",
    "village.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<VillageConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&substitute_env(&raw), path)
}

/// Discover the config file, load it, then apply environment overrides.
///
/// Search order:
/// 1. `./village.{toml,yaml,yml,json}`
/// 2. `<user config dir>/village/village.{toml,yaml,yml,json}`
///
/// A missing or unreadable file falls back to defaults; env vars still apply.
pub fn discover_and_load() -> VillageConfig {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                VillageConfig::default()
            })
        },
        None => {
            debug!("no config file found, using defaults");
            VillageConfig::default()
        },
    };
    apply_env_overrides(&mut config);
    config
}

/// Overlay process environment variables onto `config`.
pub fn apply_env_overrides(config: &mut VillageConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(config: &mut VillageConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup("SLACK_BOT_TOKEN") {
        config.slack.bot_token = Secret::new(token);
    }
    if let Some(channel) = lookup("SLACK_CHANNEL_ID") {
        config.slack.channel_id = channel;
    }
    if let Some(base) = lookup("SLACK_API_BASE_URL") {
        config.slack.api_base_url = base;
    }
    if let Some(origin) = lookup("FRONTEND_URL") {
        config.cors.allowed_origin = origin;
    }
    if let Some(env) = lookup("APP_ENV") {
        config.server.environment = env;
    }
    if let Some(tz) = lookup("VILLAGE_TIMEZONE") {
        config.server.timezone = Some(tz);
    }
    if let Some(port) = lookup("PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(e) => warn!(value = %port, error = %e, "ignoring invalid PORT"),
        }
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .or_else(|| {
            let dir = config_dir()?;
            CONFIG_FILENAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|p| p.exists())
        })
}

/// Returns the user-global config directory (`~/.config/village/` on Linux).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "village").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<VillageConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse("toml", e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse("yaml", e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse("json", e)),
        _ => Err(Error::message(format!("unsupported config format: .{ext}"))),
    }
}
