use {
    futures::{StreamExt, future, stream},
    tracing::{debug, info, instrument, warn},
};

use crate::{
    ChannelSource,
    error::{Error, Result},
    model::Student,
};

/// Lists the human members of a channel.
#[derive(Clone)]
pub struct MemberLister {
    source: ChannelSource,
}

impl MemberLister {
    pub fn new(source: ChannelSource) -> Self {
        Self { source }
    }

    /// Resolve every member id and keep the non-bot accounts, in member order.
    ///
    /// Ids that fail to resolve are dropped with a warning.
    #[instrument(skip(self), fields(channel = %self.source.channel_id))]
    pub async fn fetch(&self) -> Result<Vec<Student>> {
        let member_ids = self
            .source
            .slack
            .conversation_members(&self.source.channel_id)
            .await
            .map_err(Error::Members)?;
        let total = member_ids.len();

        let students: Vec<Student> = stream::iter(member_ids)
            .map(|id| self.resolve(id))
            .buffered(self.source.lookup_concurrency.max(1))
            .filter_map(future::ready)
            .collect()
            .await;

        info!(total, students = students.len(), "fetched channel members");
        Ok(students)
    }

    async fn resolve(&self, user_id: String) -> Option<Student> {
        match self.source.slack.user_info(&user_id).await {
            Ok(user) if user.is_bot => {
                debug!(user_id, "skipping bot member");
                None
            },
            Ok(user) => Some(Student {
                name: user.display_name().to_string(),
            }),
            Err(e) => {
                warn!(user_id, error = %e, "failed to resolve channel member, skipping");
                None
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::{Arc, atomic::Ordering};

    use super::*;
    use crate::testing::{FakeSlack, source};

    #[tokio::test]
    async fn lists_humans_in_member_order() {
        let slack = Arc::new(
            FakeSlack {
                members: Some(vec!["U2".into(), "B1".into(), "U1".into()]),
                ..FakeSlack::default()
            }
            .with_user("U1", "ada", Some("Ada Lovelace"), false)
            .with_user("U2", "linus", Some(""), false)
            .with_user("B1", "checkin-bot", Some("Check-in Bot"), true),
        );

        let students = MemberLister::new(source(&slack)).fetch().await.unwrap();

        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["linus", "Ada Lovelace"]);
        assert_eq!(slack.user_lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn drops_unresolvable_members() {
        let slack = Arc::new(
            FakeSlack {
                members: Some(vec!["U404".into(), "U1".into()]),
                ..FakeSlack::default()
            }
            .with_user("U1", "ada", None, false),
        );

        let students = MemberLister::new(source(&slack)).fetch().await.unwrap();

        assert_eq!(students, vec![Student { name: "ada".into() }]);
    }

    #[tokio::test]
    async fn member_listing_failure_is_an_error() {
        let slack = Arc::new(FakeSlack::default());

        let err = MemberLister::new(source(&slack)).fetch().await.unwrap_err();

        assert!(matches!(err, Error::Members(_)));
        assert!(err.to_string().contains("not_in_channel"));
    }
}
