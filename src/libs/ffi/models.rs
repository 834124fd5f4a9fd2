// Rust models for the types that will be used by front-end

use crate::libs::core::models::{AttachmentKind, Message, Participant};
use crate::libs::feed::store::FeedState;
use std::collections::HashMap;

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ChatReply {
    pub message_uuid: String,
    pub text: String,
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ChatAttachment {
    pub kind: String,
    pub url: String,
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ChatReaction {
    pub participant_uuid: Option<String>,
    pub value: String,
}

/// Timestamps are milliseconds since the unix epoch.
#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ChatMessage {
    pub uuid: String,
    pub author_uuid: String,
    pub text: String,
    pub sent_at: i64,
    pub updated_at: Option<i64>,
    pub is_edited: bool,
    pub reply_to: Option<ChatReply>,
    pub attachments: Vec<ChatAttachment>,
    pub reactions: Vec<ChatReaction>,
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ChatParticipant {
    pub uuid: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct FeedSnapshot {
    pub messages: Vec<ChatMessage>,
    pub participants: HashMap<String, ChatParticipant>,
    pub input: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            uuid: message.uuid.clone(),
            author_uuid: message.author_uuid.clone(),
            text: message.text.clone(),
            sent_at: message.sent_at.timestamp_millis(),
            updated_at: message.updated_at.map(|t| t.timestamp_millis()),
            is_edited: message.is_edited(),
            reply_to: message.reply_to_message.as_ref().map(|reply| ChatReply {
                message_uuid: reply.uuid.clone(),
                text: reply.text.clone(),
            }),
            attachments: message
                .attachments
                .iter()
                .map(|attachment| ChatAttachment {
                    kind: match attachment.kind {
                        AttachmentKind::Image => "image".to_string(),
                        AttachmentKind::Other => "other".to_string(),
                    },
                    url: attachment.url.clone(),
                })
                .collect(),
            reactions: message
                .reactions
                .iter()
                .map(|reaction| ChatReaction {
                    participant_uuid: reaction.participant_uuid.clone(),
                    value: reaction.value.clone(),
                })
                .collect(),
        }
    }
}

impl From<&Participant> for ChatParticipant {
    fn from(participant: &Participant) -> Self {
        Self {
            uuid: participant.uuid.clone(),
            name: participant.name.clone(),
            avatar_url: participant.avatar_url.clone(),
        }
    }
}

impl From<&FeedState> for FeedSnapshot {
    fn from(state: &FeedState) -> Self {
        Self {
            messages: state.messages.iter().map(ChatMessage::from).collect(),
            participants: state
                .participants
                .iter()
                .map(|(uuid, participant)| (uuid.clone(), ChatParticipant::from(participant)))
                .collect(),
            input: state.input.clone(),
        }
    }
}
