//! Conversion logic between domain types and DTOs.

use hiroba_shared::time::to_rfc3339_millis;

use crate::domain::{DisplayName, MessageRecord, OutboundEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain → DTO
// ========================================

impl From<&MessageRecord> for dto::MessageRecordDto {
    fn from(record: &MessageRecord) -> Self {
        Self {
            username: record.author.as_ref().map(|name| name.as_str().to_string()),
            text: record.text.clone(),
            timestamp: to_rfc3339_millis(&record.timestamp),
            private: record.private,
            recipient: record.recipient.clone(),
        }
    }
}

impl From<&OutboundEvent> for dto::ServerEvent {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::UserJoined { name, connection } => {
                Self::UserJoined(dto::PresenceChange {
                    username: name.as_str().to_string(),
                    id: connection.to_string(),
                })
            }
            OutboundEvent::UserLeft { name, connection } => Self::UserLeft(dto::PresenceChange {
                username: name.as_str().to_string(),
                id: connection.to_string(),
            }),
            OutboundEvent::UsersList(names) => {
                Self::UsersList(names.iter().map(|name| name.as_str().to_string()).collect())
            }
            OutboundEvent::MessageHistory(records) => {
                Self::MessageHistory(records.iter().map(dto::MessageRecordDto::from).collect())
            }
            OutboundEvent::Message(record) => Self::Message(record.into()),
            OutboundEvent::Typing { connection, name } => Self::Typing(dto::TypingNotice {
                user_id: connection.to_string(),
                username: name.as_ref().map(DisplayName::to_string),
            }),
            OutboundEvent::StopTyping { connection } => {
                Self::StopTyping(dto::StopTypingNotice {
                    user_id: connection.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::ConnectionId;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value).unwrap()
    }

    #[test]
    fn test_message_record_to_dto() {
        // テスト項目: ドメインの MessageRecord が DTO に変換される
        // given (前提条件):
        let timestamp = Utc.timestamp_millis_opt(1_672_531_200_123).unwrap();
        let record = MessageRecord::new(
            Some(name("alice")),
            "hi".to_string(),
            timestamp,
            true,
            Some("bob".to_string()),
        );

        // when (操作):
        let dto = dto::MessageRecordDto::from(&record);

        // then (期待する結果):
        assert_eq!(dto.username.as_deref(), Some("alice"));
        assert_eq!(dto.text, "hi");
        assert_eq!(dto.timestamp, "2023-01-01T00:00:00.123Z");
        assert!(dto.private);
        assert_eq!(dto.recipient.as_deref(), Some("bob"));
    }

    #[test]
    fn test_message_without_author_serializes_null_username() {
        // テスト項目: join 前の送信者のメッセージは username が null になる
        // given (前提条件):
        let timestamp = Utc.timestamp_millis_opt(0).unwrap();
        let record = MessageRecord::public(None, "anonymous".to_string(), timestamp);

        // when (操作):
        let json = serde_json::to_value(dto::ServerEvent::from(&OutboundEvent::Message(record)))
            .unwrap();

        // then (期待する結果):
        assert_eq!(json["event"], "message");
        assert!(json["data"]["username"].is_null());
        assert_eq!(json["data"]["private"], false);
        assert!(json["data"]["recipient"].is_null());
    }

    #[test]
    fn test_presence_events_to_dto() {
        // テスト項目: userJoined / usersList イベントがワイヤ形式に変換される
        // given (前提条件):
        let connection = ConnectionId::generate();
        let joined = OutboundEvent::UserJoined {
            name: name("alice"),
            connection,
        };
        let list = OutboundEvent::UsersList(vec![name("alice"), name("bob")]);

        // when (操作):
        let joined = serde_json::to_value(dto::ServerEvent::from(&joined)).unwrap();
        let list = serde_json::to_value(dto::ServerEvent::from(&list)).unwrap();

        // then (期待する結果):
        assert_eq!(
            joined,
            serde_json::json!({
                "event": "userJoined",
                "data": {"username": "alice", "id": connection.to_string()},
            })
        );
        assert_eq!(
            list,
            serde_json::json!({"event": "usersList", "data": ["alice", "bob"]})
        );
    }

    #[test]
    fn test_typing_event_to_dto() {
        // テスト項目: typing イベントに userId と username が含まれる
        // given (前提条件):
        let connection = ConnectionId::generate();
        let event = OutboundEvent::Typing {
            connection,
            name: None,
        };

        // when (操作):
        let json = serde_json::to_value(dto::ServerEvent::from(&event)).unwrap();

        // then (期待する結果):
        assert_eq!(json["event"], "typing");
        assert_eq!(json["data"]["userId"], connection.to_string());
        assert!(json["data"]["username"].is_null());
    }
}
