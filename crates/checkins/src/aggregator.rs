use {
    chrono_tz::Tz,
    futures::{StreamExt, future, stream},
    tracing::{info, instrument, warn},
    village_slack::SlackMessage,
};

use crate::{
    ChannelSource,
    error::{Error, Result},
    model::Checkin,
};

/// Number of history messages requested per dashboard load.
pub const HISTORY_PAGE_SIZE: u32 = 100;

/// Builds the check-in feed for one channel.
#[derive(Clone)]
pub struct CheckinAggregator {
    source: ChannelSource,
    zone: Option<Tz>,
}

impl CheckinAggregator {
    pub fn new(source: ChannelSource) -> Self {
        Self { source, zone: None }
    }

    /// Render clock times in `zone` instead of the host's local zone.
    #[must_use]
    pub fn with_timezone(mut self, zone: Option<Tz>) -> Self {
        self.zone = zone;
        self
    }

    /// Fetch recent history and return check-ins, oldest first.
    ///
    /// Bot and empty messages are skipped. Messages whose author cannot be
    /// resolved are dropped with a warning.
    #[instrument(skip(self), fields(channel = %self.source.channel_id))]
    pub async fn fetch(&self) -> Result<Vec<Checkin>> {
        let history = self
            .source
            .slack
            .conversation_history(&self.source.channel_id, HISTORY_PAGE_SIZE)
            .await
            .map_err(Error::History)?;
        let fetched = history.len();

        let candidates: Vec<SlackMessage> = history.into_iter().filter(is_checkin).collect();

        let mut checkins: Vec<Checkin> = stream::iter(candidates)
            .map(|msg| self.build(msg))
            .buffered(self.source.lookup_concurrency.max(1))
            .filter_map(future::ready)
            .collect()
            .await;

        // Slack returns newest first.
        checkins.reverse();

        info!(fetched, kept = checkins.len(), "fetched check-in messages");
        Ok(checkins)
    }

    async fn build(&self, msg: SlackMessage) -> Option<Checkin> {
        let Some(user_id) = msg.user.as_deref() else {
            warn!(ts = %msg.ts, "check-in has no author, skipping");
            return None;
        };
        let Some(sent_at) = msg.sent_at() else {
            warn!(ts = %msg.ts, "unparseable message timestamp, skipping");
            return None;
        };
        let author = match self.source.slack.user_info(user_id).await {
            Ok(author) => author,
            Err(e) => {
                warn!(user_id, error = %e, "failed to resolve check-in author, skipping");
                return None;
            },
        };
        Some(Checkin::new(author.display_name(), sent_at, msg.text, self.zone))
    }
}

/// Human messages with text.
fn is_checkin(msg: &SlackMessage) -> bool {
    !msg.text.is_empty() && !msg.is_automated()
}
