//! Check-in aggregation for the village dashboard.
//!
//! Turns raw Slack channel history into display-ready [`Checkin`] records and
//! channel membership into [`Student`] names. Project labels and technology
//! tags are derived from message text by the pure heuristics in [`extract`].

pub mod aggregator;
pub mod error;
pub mod extract;
pub mod members;
pub mod model;

use std::sync::Arc;

use village_slack::SlackApi;

pub use {
    aggregator::{CheckinAggregator, HISTORY_PAGE_SIZE},
    error::{Error, Result},
    members::MemberLister,
    model::{Checkin, Student},
};

/// The Slack channel a dashboard reads from, plus the client to reach it.
#[derive(Clone)]
pub struct ChannelSource {
    pub slack: Arc<dyn SlackApi>,
    pub channel_id: String,
    /// Upper bound on concurrent `users.info` lookups.
    pub lookup_concurrency: usize,
}

impl ChannelSource {
    pub fn new(slack: Arc<dyn SlackApi>, channel_id: impl Into<String>) -> Self {
        Self {
            slack,
            channel_id: channel_id.into(),
            lookup_concurrency: 16,
        }
    }

    #[must_use]
    pub fn with_lookup_concurrency(mut self, limit: usize) -> Self {
        self.lookup_concurrency = limit.max(1);
        self
    }
}

#[cfg(test)]
pub(crate) mod testing;
