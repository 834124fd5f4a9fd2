use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Participant directory keyed by participant uuid.
pub type ParticipantMap = HashMap<String, Participant>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub uuid: String,
    pub author_uuid: String,
    pub text: String,
    #[serde(deserialize_with = "wire_time::deserialize")]
    pub sent_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "wire_time::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<ReplyReference>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// A message counts as edited only when `updated_at` is strictly later
    /// than `sent_at`. An earlier `updated_at` is accepted as-is.
    pub fn is_edited(&self) -> bool {
        self.updated_at
            .map(|updated_at| updated_at > self.sent_at)
            .unwrap_or(false)
    }

    pub fn first_image(&self) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|attachment| attachment.kind == AttachmentKind::Image)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyReference {
    pub uuid: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_uuid: Option<String>,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_uuid: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub text: String,
}

/// Timestamps arrive either as RFC 3339 strings or as epoch milliseconds.
mod wire_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireTime {
        Millis(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>),
        Text(DateTime<Utc>),
    }

    impl From<WireTime> for DateTime<Utc> {
        fn from(time: WireTime) -> Self {
            match time {
                WireTime::Millis(time) | WireTime::Text(time) => time,
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        WireTime::deserialize(deserializer).map(Into::into)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<WireTime>::deserialize(deserializer).map(|time| time.map(Into::into))
    }
}

// Later entries overwrite earlier ones with the same uuid.
pub fn index_participants(participants: Vec<Participant>) -> ParticipantMap {
    participants
        .into_iter()
        .map(|participant| (participant.uuid.clone(), participant))
        .collect()
}
