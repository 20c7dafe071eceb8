//! WebSocket event DTOs.
//!
//! Every text frame carries one envelope `{"event": <name>, "data": <payload>}`.
//! Payload-less events omit `data`.

use serde::{Deserialize, Serialize};

/// Client-to-server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Announce a display name
    Join(String),
    Message(IncomingMessage),
    Typing,
    StopTyping,
}

/// Payload of a client `message` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Server-to-client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    UserJoined(PresenceChange),
    UserLeft(PresenceChange),
    UsersList(Vec<String>),
    MessageHistory(Vec<MessageRecordDto>),
    Message(MessageRecordDto),
    Typing(TypingNotice),
    StopTyping(StopTypingNotice),
}

/// Payload of `userJoined` / `userLeft`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceChange {
    pub username: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingNotice {
    pub user_id: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTypingNotice {
    pub user_id: String,
}

/// Message Record as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecordDto {
    pub username: Option<String>,
    pub text: String,
    /// RFC 3339, millisecond precision, UTC
    pub timestamp: String,
    pub private: bool,
    pub recipient: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_event() {
        // テスト項目: join イベントがパースできる
        // given (前提条件):
        let frame = r#"{"event":"join","data":"alice"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::Join("alice".to_string()));
    }

    #[test]
    fn test_parse_message_event_with_optional_fields_missing() {
        // テスト項目: private / recipient を省略した message イベントがパースできる
        // given (前提条件):
        let frame = r#"{"event":"message","data":{"text":"hello"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Message(IncomingMessage {
                text: "hello".to_string(),
                private: None,
                recipient: None,
            })
        );
    }

    #[test]
    fn test_parse_private_message_event() {
        // テスト項目: プライベートメッセージがパースできる
        // given (前提条件):
        let frame =
            r#"{"event":"message","data":{"text":"hi","private":true,"recipient":"bob"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        let ClientEvent::Message(message) = event else {
            panic!("expected message event");
        };
        assert_eq!(message.private, Some(true));
        assert_eq!(message.recipient.as_deref(), Some("bob"));
    }

    #[test]
    fn test_parse_payloadless_events() {
        // テスト項目: data を持たない typing / stopTyping イベントがパースできる
        // given (前提条件):
        let typing = r#"{"event":"typing"}"#;
        let stop_typing = r#"{"event":"stopTyping"}"#;

        // when (操作):
        let typing: ClientEvent = serde_json::from_str(typing).unwrap();
        let stop_typing: ClientEvent = serde_json::from_str(stop_typing).unwrap();

        // then (期待する結果):
        assert_eq!(typing, ClientEvent::Typing);
        assert_eq!(stop_typing, ClientEvent::StopTyping);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        // テスト項目: 未知のイベント名はパースエラーになる
        // given (前提条件):
        let frame = r#"{"event":"dance","data":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(frame);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_wire_names() {
        // テスト項目: サーバーイベントが camelCase のイベント名でシリアライズされる
        // given (前提条件):
        let event = ServerEvent::StopTyping(StopTypingNotice {
            user_id: "abc".to_string(),
        });

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({"event": "stopTyping", "data": {"userId": "abc"}})
        );
    }
}
