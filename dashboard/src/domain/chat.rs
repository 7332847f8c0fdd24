//! Per-project discussion threads.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::ports::IdGenerator;
use super::{DisplayName, Error, MessageId, ProjectId, User, UserId};

/// One chat message, attributed to the sender as they were when it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: MessageId,
    project_id: ProjectId,
    user_id: UserId,
    user_name: DisplayName,
    content: String,
    sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Message identifier.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Project the thread belongs to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Sender identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Sender display name at send time.
    pub fn user_name(&self) -> &DisplayName {
        &self.user_name
    }

    /// Body exactly as typed.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Send timestamp.
    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

/// Chat threads keyed by project, each in send order.
pub struct ChatLog {
    threads: HashMap<ProjectId, Vec<ChatMessage>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl ChatLog {
    /// Create an empty log.
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            threads: HashMap::new(),
            ids,
            clock,
        }
    }

    /// Append a message to a project's thread.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
    /// when `content` is blank.
    pub fn send_message(
        &mut self,
        project_id: ProjectId,
        author: &User,
        content: impl Into<String>,
    ) -> Result<&ChatMessage, Error> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(Error::invalid_request("message content is required")
                .with_details(json!({ "field": "content" })));
        }

        let message = ChatMessage {
            id: MessageId::from_uuid(self.ids.next_id()),
            project_id,
            user_id: author.id().clone(),
            user_name: author.name().clone(),
            content,
            sent_at: self.clock.utc(),
        };
        debug!(%project_id, message_id = %message.id, user_id = %message.user_id, "message sent");

        let thread = self.threads.entry(project_id).or_default();
        thread.push(message);
        thread
            .last()
            .ok_or_else(|| Error::internal("thread empty after push"))
    }

    /// Messages for a project, oldest first.
    pub fn messages(&self, project_id: ProjectId) -> &[ChatMessage] {
        self.threads.get(&project_id).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SequentialIdGenerator;
    use crate::domain::{EmailAddress, ErrorCode, UserRole};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn log() -> ChatLog {
        ChatLog::new(
            Arc::new(SequentialIdGenerator::starting_at(1)),
            Arc::new(DefaultClock),
        )
    }

    #[fixture]
    fn author() -> User {
        User::new(
            UserId::random(),
            DisplayName::new("Grace Hopper").expect("name"),
            EmailAddress::new("grace@example.com").expect("email"),
            UserRole::Client,
        )
    }

    fn project(n: u128) -> ProjectId {
        ProjectId::from_uuid(Uuid::from_u128(n))
    }

    #[rstest]
    fn messages_are_kept_in_send_order_per_project(mut log: ChatLog, author: User) {
        log.send_message(project(1), &author, "first").expect("send");
        log.send_message(project(2), &author, "elsewhere").expect("send");
        log.send_message(project(1), &author, "second").expect("send");

        let contents: Vec<_> = log
            .messages(project(1))
            .iter()
            .map(ChatMessage::content)
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(log.messages(project(2)).len(), 1);
        assert!(log.messages(project(3)).is_empty());
    }

    #[rstest]
    fn message_carries_author_and_untrimmed_content(mut log: ChatLog, author: User) {
        let message = log
            .send_message(project(1), &author, "  hello  ")
            .expect("send");

        assert_eq!(message.content(), "  hello  ");
        assert_eq!(message.user_id(), author.id());
        assert_eq!(message.user_name().as_ref(), "Grace Hopper");
        assert_eq!(message.project_id(), project(1));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_messages_are_rejected(mut log: ChatLog, author: User, #[case] content: &str) {
        let err = log
            .send_message(project(1), &author, content)
            .map(|_| ())
            .expect_err("blank message");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(log.messages(project(1)).is_empty());
    }
}
