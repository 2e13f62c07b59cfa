use std::time::Duration;

use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
    serde::de::DeserializeOwned,
    tracing::debug,
};

use village_config::SlackConfig;

use crate::{
    error::{Error, Result},
    types::{
        AuthIdentity, HistoryResponse, MembersResponse, SlackMessage, SlackUser, UserInfoResponse,
    },
};

/// Read-only Slack operations used by the dashboard.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Most recent messages in `channel`, newest first.
    async fn conversation_history(&self, channel: &str, limit: u32) -> Result<Vec<SlackMessage>>;

    /// Member user ids of `channel` (first page only).
    async fn conversation_members(&self, channel: &str) -> Result<Vec<String>>;

    async fn user_info(&self, user_id: &str) -> Result<SlackUser>;

    /// Identity behind the configured token.
    async fn auth_test(&self) -> Result<AuthIdentity>;
}

/// [`SlackApi`] over HTTPS with a bot token.
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: Secret<String>,
}

impl SlackClient {
    pub fn new(base_url: impl Into<String>, token: Secret<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("village/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &SlackConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.bot_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Call a Web API method and decode the body once `ok` is confirmed.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{method}", self.base_url);
        debug!(method, "slack api call");

        let mut req = self.http.get(url).bearer_auth(self.token.expose_secret());
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req
            .send()
            .await
            .map_err(|source| Error::Http { method, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                method,
                status,
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| Error::Http { method, source })?;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| Error::Decode { method, source })?;

        if body.get("ok").and_then(serde_json::Value::as_bool) != Some(true) {
            let code = body
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown_error")
                .to_string();
            return Err(Error::Api { method, code });
        }

        serde_json::from_value(body).map_err(|source| Error::Decode { method, source })
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn conversation_history(&self, channel: &str, limit: u32) -> Result<Vec<SlackMessage>> {
        let limit = limit.to_string();
        let resp: HistoryResponse = self
            .call("conversations.history", &[
                ("channel", channel),
                ("limit", limit.as_str()),
            ])
            .await?;
        Ok(resp.messages)
    }

    async fn conversation_members(&self, channel: &str) -> Result<Vec<String>> {
        let resp: MembersResponse = self
            .call("conversations.members", &[("channel", channel)])
            .await?;
        Ok(resp.members)
    }

    async fn user_info(&self, user_id: &str) -> Result<SlackUser> {
        let resp: UserInfoResponse = self.call("users.info", &[("user", user_id)]).await?;
        Ok(resp.user)
    }

    async fn auth_test(&self) -> Result<AuthIdentity> {
        self.call("auth.test", &[]).await
    }
}
