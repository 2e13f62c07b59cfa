use std::sync::Arc;

use {
    village_checkins::{ChannelSource, CheckinAggregator, MemberLister},
    village_config::VillageConfig,
    village_slack::SlackApi,
};

/// Per-process state shared by every handler. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub checkins: CheckinAggregator,
    pub members: MemberLister,
    pub slack: Arc<dyn SlackApi>,
    /// Whether a bot token was configured at startup.
    pub slack_connected: bool,
}

impl AppState {
    pub fn new(config: &VillageConfig, slack: Arc<dyn SlackApi>) -> anyhow::Result<Self> {
        let zone = config
            .server
            .display_timezone()
            .map_err(|e| anyhow::anyhow!(e))?;
        let source = ChannelSource::new(Arc::clone(&slack), config.slack.channel_id.clone())
            .with_lookup_concurrency(config.slack.lookup_concurrency);

        Ok(Self {
            checkins: CheckinAggregator::new(source.clone()).with_timezone(zone),
            members: MemberLister::new(source),
            slack,
            slack_connected: config.slack.has_token(),
        })
    }
}
