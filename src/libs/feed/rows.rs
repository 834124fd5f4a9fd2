use crate::libs::core::models::{Message, ParticipantMap};
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// A message joined with its author, ready to be drawn by the host UI.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct MessageRow {
    pub message_uuid: String,
    pub author_name: Option<String>,
    pub avatar_url: Option<String>,
    /// `HH:mm`
    pub sent_time: String,
    pub reply_preview: Option<String>,
    pub text: String,
    pub is_edited: bool,
    pub image_url: Option<String>,
    pub reactions: Vec<String>,
}

pub fn message_row<Tz>(message: &Message, participants: &ParticipantMap, tz: &Tz) -> MessageRow
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let author = participants.get(&message.author_uuid);
    MessageRow {
        message_uuid: message.uuid.clone(),
        author_name: author.map(|p| p.name.clone()),
        avatar_url: author.and_then(|p| p.avatar_url.clone()),
        sent_time: message
            .sent_at
            .with_timezone(tz)
            .format("%H:%M")
            .to_string(),
        reply_preview: message.reply_to_message.as_ref().map(|r| r.text.clone()),
        text: message.text.clone(),
        is_edited: message.is_edited(),
        image_url: message.first_image().map(|a| a.url.clone()),
        reactions: message.reactions.iter().map(|r| r.value.clone()).collect(),
    }
}

pub fn message_rows_in<Tz>(
    messages: &[Message],
    participants: &ParticipantMap,
    tz: &Tz,
) -> Vec<MessageRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    messages
        .iter()
        .map(|message| message_row(message, participants, tz))
        .collect()
}

pub fn message_rows(messages: &[Message], participants: &ParticipantMap) -> Vec<MessageRow> {
    message_rows_in(messages, participants, &Local)
}
