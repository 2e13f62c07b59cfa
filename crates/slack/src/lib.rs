//! Minimal Slack Web API client for channel history and membership.
//!
//! Only the four read-only methods the check-in dashboard needs are covered:
//! `conversations.history`, `conversations.members`, `users.info` and
//! `auth.test`. Callers depend on the [`SlackApi`] trait so tests can swap in
//! an in-memory fake.

pub mod client;
pub mod error;
pub mod types;

pub use {
    client::{SlackApi, SlackClient},
    error::{Error, Result},
    types::{AuthIdentity, SlackMessage, SlackUser},
};
