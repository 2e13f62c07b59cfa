//! In-memory [`SlackApi`] used by the aggregator and lister tests.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use {
    async_trait::async_trait,
    village_slack::{AuthIdentity, Error, Result, SlackApi, SlackMessage, SlackUser},
};

use crate::ChannelSource;

#[derive(Default)]
pub(crate) struct FakeSlack {
    pub history: Option<Vec<SlackMessage>>,
    pub members: Option<Vec<String>>,
    pub users: HashMap<String, SlackUser>,
    pub user_lookups: AtomicUsize,
    /// Per-user `users.info` latency.
    pub delays: HashMap<String, Duration>,
}

impl FakeSlack {
    pub fn with_user(mut self, id: &str, name: &str, real_name: Option<&str>, is_bot: bool) -> Self {
        self.users.insert(id.to_string(), SlackUser {
            id: id.to_string(),
            name: name.to_string(),
            real_name: real_name.map(str::to_string),
            is_bot,
        });
        self
    }

    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }
}

pub(crate) fn source(slack: &Arc<FakeSlack>) -> ChannelSource {
    let api: Arc<dyn SlackApi> = slack.clone();
    ChannelSource::new(api, "C0VILLAGE").with_lookup_concurrency(4)
}

pub(crate) fn message(user: Option<&str>, text: &str, ts: &str) -> SlackMessage {
    SlackMessage {
        text: text.to_string(),
        user: user.map(str::to_string),
        ts: ts.to_string(),
        bot_id: None,
        subtype: None,
    }
}

fn not_ok(method: &'static str, code: &str) -> Error {
    Error::Api {
        method,
        code: code.to_string(),
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn conversation_history(&self, channel: &str, _limit: u32) -> Result<Vec<SlackMessage>> {
        assert_eq!(channel, "C0VILLAGE");
        self.history
            .clone()
            .ok_or_else(|| not_ok("conversations.history", "channel_not_found"))
    }

    async fn conversation_members(&self, channel: &str) -> Result<Vec<String>> {
        assert_eq!(channel, "C0VILLAGE");
        self.members
            .clone()
            .ok_or_else(|| not_ok("conversations.members", "not_in_channel"))
    }

    async fn user_info(&self, user_id: &str) -> Result<SlackUser> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(user_id) {
            tokio::time::sleep(*delay).await;
        }
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_ok("users.info", "user_not_found"))
    }

    async fn auth_test(&self) -> Result<AuthIdentity> {
        Err(not_ok("auth.test", "not_authed"))
    }
}
