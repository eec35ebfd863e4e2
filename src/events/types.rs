//! Typed events delivered by the streaming API.
//!
//! Every event shares the [`EventEnvelope`] fields; the `content` field
//! changes shape per event type.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treats an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields present on every stream event.
///
/// Missing fields decode to their zero value; typing notifications for
/// example only carry `flow`, `sent` and `user`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EventEnvelope {
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    pub id: i64,
    /// Id of the flow the event happened in.
    pub flow: String,
    /// Seconds since the epoch.
    pub sent: i64,
    #[serde(deserialize_with = "nullable")]
    pub attachments: Vec<Value>,
    /// Id of the user who caused the event.
    #[serde(rename = "user")]
    pub user_id: String,
}

/// A user started a new thread in a flow.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MessageEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: String,
}

/// A user changed their status line.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StatusEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: String,
}

impl std::fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Utc.timestamp_opt(self.envelope.sent, 0).single() {
            Some(at) => write!(
                f,
                "User with ID {} changed their status to {} at {}.",
                self.envelope.user_id, self.content, at
            ),
            None => write!(
                f,
                "User with ID {} changed their status to {}.",
                self.envelope.user_id, self.content
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CommentContent {
    pub title: String,
    pub text: String,
}

/// A comment on a team inbox item or an existing thread.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CommentEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: CommentContent,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MessageEditContent {
    #[serde(rename = "updated_content")]
    pub updated_message: String,
    /// Id of the edited message.
    #[serde(rename = "message")]
    pub message_id: i64,
}

/// The text of a message or comment was edited.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MessageEditEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: MessageEditContent,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TagChangeContent {
    #[serde(rename = "add", default, deserialize_with = "nullable")]
    pub added: Vec<String>,
    #[serde(rename = "remove", default, deserialize_with = "nullable")]
    pub removed: Vec<String>,
    /// Id of the retagged message.
    #[serde(rename = "message")]
    pub message_id: i64,
}

/// The tags of a message changed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TagChangeEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: TagChangeContent,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct UserActivityContent {
    /// Seconds since the epoch.
    pub last_activity: i64,
}

/// Periodic presence ping from a user.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserActivityEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: UserActivityContent,
}

/// A file was uploaded.
///
/// `content` holds the upload metadata and `attachments` a copy of it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FileEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    pub content: Map<String, Value>,
}

impl FileEvent {
    /// REST path the file can be downloaded from, or `""` when absent.
    pub fn file_path(&self) -> &str {
        self.content
            .get("path")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// A user is typing in a flow. Sent repeatedly while they type.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserIsTypingEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
}

/// Any other activity, such as adding a Twitter stream to a flow.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ActionEvent {
    /// The wire tag of the event.
    #[serde(rename = "event")]
    pub action_type: String,
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    /// Schema-less content: a string, an object, or null when absent.
    #[serde(default)]
    pub content: Value,
}

/// An event received from the streaming API.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(MessageEvent),
    Status(StatusEvent),
    Comment(CommentEvent),
    MessageEdit(MessageEditEvent),
    TagChange(TagChangeEvent),
    UserActivity(UserActivityEvent),
    File(FileEvent),
    UserIsTyping(UserIsTypingEvent),
    Action(ActionEvent),
}

impl Event {
    /// The wire tag this event was decoded from.
    pub fn event_type_name(&self) -> &str {
        match self {
            Event::Message(_) => "message",
            Event::Status(_) => "status",
            Event::Comment(_) => "comment",
            Event::MessageEdit(_) => "message-edit",
            Event::TagChange(_) => "tag-change",
            Event::UserActivity(_) => "activity.user",
            Event::File(_) => "file",
            Event::UserIsTyping(_) => "typing",
            Event::Action(e) => &e.action_type,
        }
    }

    pub fn envelope(&self) -> &EventEnvelope {
        match self {
            Event::Message(e) => &e.envelope,
            Event::Status(e) => &e.envelope,
            Event::Comment(e) => &e.envelope,
            Event::MessageEdit(e) => &e.envelope,
            Event::TagChange(e) => &e.envelope,
            Event::UserActivity(e) => &e.envelope,
            Event::File(e) => &e.envelope,
            Event::UserIsTyping(e) => &e.envelope,
            Event::Action(e) => &e.envelope,
        }
    }

    pub fn id(&self) -> i64 {
        self.envelope().id
    }

    pub fn flow(&self) -> &str {
        &self.envelope().flow
    }

    pub fn user_id(&self) -> &str {
        &self.envelope().user_id
    }

    pub fn sent(&self) -> i64 {
        self.envelope().sent
    }

    /// `sent` as a UTC timestamp, if it is in range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.sent(), 0).single()
    }
}
