//! Wire types for the Slack Web API responses we consume.

use {
    chrono::{DateTime, Utc},
    serde::Deserialize,
};

/// A message from `conversations.history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackMessage {
    #[serde(default)]
    pub text: String,
    /// Author user id. Absent on some system messages.
    pub user: Option<String>,
    /// Send time as `"<seconds>.<micros>"`.
    #[serde(default)]
    pub ts: String,
    /// Set when the message was posted by a bot or integration.
    pub bot_id: Option<String>,
    pub subtype: Option<String>,
}

impl SlackMessage {
    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.bot_id.is_some()
    }

    /// Parse [`Self::ts`] into an instant.
    #[must_use]
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        parse_ts(&self.ts)
    }
}

/// Parse a Slack `ts` string (`"1700000000.123456"`).
#[must_use]
pub fn parse_ts(ts: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = ts.trim().split_once('.').unwrap_or((ts.trim(), ""));
    let secs: i64 = secs.parse().ok()?;
    let micros: u32 = if frac.is_empty() {
        0
    } else {
        if frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // "5" means 500000 micros, "000123" means 123.
        format!("{frac:0<6}").parse().ok()?
    };
    DateTime::from_timestamp(secs, micros * 1_000)
}

/// A workspace member from `users.info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackUser {
    pub id: String,
    /// Handle, always present.
    #[serde(default)]
    pub name: String,
    pub real_name: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
}

impl SlackUser {
    /// Real name when set and non-empty, otherwise the handle.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.real_name.as_deref() {
            Some(real) if !real.is_empty() => real,
            _ => &self.name,
        }
    }
}

/// Token identity from `auth.test`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthIdentity {
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub user_id: String,
    pub bot_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<SlackMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoResponse {
    pub user: SlackUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MembersResponse {
    #[serde(default)]
    pub members: Vec<String>,
}
