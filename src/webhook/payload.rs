//! JSON payloads exchanged with the chat platform.

use serde::{Deserialize, Serialize};

use crate::commands::{ChatEvent, Mention, Reply};

/// Room message notification.
///
/// ```json
/// {
///   "oauth_client_id": "oauthId",
///   "item": {
///     "message": {
///       "message": "add @bob and me",
///       "from": { "name": "My Name" },
///       "mentions": [{ "mention_name": "bob", "name": "Bob" }]
///     },
///     "room": { "id": 12321 }
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub oauth_client_id: String,
    pub item: ItemPayload,
}

#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub message: MessageBody,
    pub room: RoomPayload,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub from: SenderPayload,
    #[serde(default)]
    pub mentions: Vec<MentionPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SenderPayload {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MentionPayload {
    pub mention_name: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomPayload {
    pub id: RoomIdPayload,
}

/// Room ids are numbers on the wire, strings are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RoomIdPayload {
    Number(u64),
    Text(String),
}

impl From<RoomIdPayload> for String {
    fn from(id: RoomIdPayload) -> Self {
        match id {
            RoomIdPayload::Number(id) => id.to_string(),
            RoomIdPayload::Text(id) => id,
        }
    }
}

impl From<MessagePayload> for ChatEvent {
    fn from(payload: MessagePayload) -> Self {
        let message = payload.item.message;

        ChatEvent {
            oauth_id: payload.oauth_client_id,
            room_id: payload.item.room.id.into(),
            text: message.message,
            sender_name: message.from.name,
            mentions: message
                .mentions
                .into_iter()
                .map(|mention| Mention {
                    handle: mention.mention_name,
                    name: mention.name,
                })
                .collect(),
        }
    }
}

/// Installation callback, sent when the bot is added to an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPayload {
    pub oauth_id: String,
    pub oauth_secret: String,
}

/// Message posted back in the room.
#[derive(Debug, PartialEq, Serialize)]
pub struct ReplyPayload {
    pub message: String,
    /// `text` or `html`
    pub message_format: &'static str,
}

impl From<Reply> for ReplyPayload {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Text(message) => ReplyPayload {
                message,
                message_format: "text",
            },
            Reply::Html(message) => ReplyPayload {
                message,
                message_format: "html",
            },
        }
    }
}
