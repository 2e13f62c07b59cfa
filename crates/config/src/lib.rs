//! Configuration loading, env overrides, `${VAR}` substitution and validation.
//!
//! Config files: `village.toml`, `village.yaml`, `village.yml` or `village.json`,
//! searched in `./` then the user config directory. Environment variables
//! (`SLACK_BOT_TOKEN`, `SLACK_CHANNEL_ID`, `FRONTEND_URL`, `PORT`, ...) take
//! precedence over file values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{CorsConfig, ServerConfig, SlackConfig, VillageConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
