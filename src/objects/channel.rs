use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A quiz channel as served by the `/channel` resource. The record is owned
/// by the server; the client only ever holds a read-only copy of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "questionsCount")]
    pub questions_count: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<FixedOffset>,
}

impl Channel {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }
}

/// The client-supplied fields of a channel, used as the body of create and
/// update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChannelFields {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The canonical list contract is the `{"channels": [...]}` envelope; bare
/// arrays are accepted here as a compatibility shim so the rest of the crate
/// only ever sees `Vec<Channel>`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChannelListBody {
    Wrapped { channels: Vec<Channel> },
    Bare(Vec<Channel>),
}

impl ChannelListBody {
    pub fn into_channels(self) -> Vec<Channel> {
        match self {
            ChannelListBody::Wrapped { channels } => channels,
            ChannelListBody::Bare(channels) => channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_underscore_id() {
        let channel: Channel = serde_json::from_str(
            r#"{"_id": "1", "name": "AI MCQ", "description": "AI quiz set", "questionsCount": 0, "createdAt": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(channel.id, "1");
        assert_eq!(channel.name, "AI MCQ");
        assert_eq!(channel.description.as_deref(), Some("AI quiz set"));
        assert_eq!(channel.questions_count, 0);
    }

    #[test]
    fn deserializes_plain_id_and_defaults() {
        let channel: Channel = serde_json::from_str(
            r#"{"id": "abc", "name": "History", "createdAt": "2024-06-15T12:30:00+02:00"}"#,
        )
        .unwrap();

        assert_eq!(channel.id, "abc");
        assert_eq!(channel.description, None);
        assert_eq!(channel.description_text(), "No description");
        assert_eq!(channel.questions_count, 0);
    }

    #[test]
    fn list_body_accepts_envelope_and_bare_array() {
        let envelope = r#"{"channels": [{"_id": "1", "name": "a", "createdAt": "2024-01-01T00:00:00Z"}]}"#;
        let bare = r#"[{"_id": "1", "name": "a", "createdAt": "2024-01-01T00:00:00Z"}]"#;

        let from_envelope: ChannelListBody = serde_json::from_str(envelope).unwrap();
        let from_bare: ChannelListBody = serde_json::from_str(bare).unwrap();

        assert_eq!(from_envelope.into_channels().len(), 1);
        assert_eq!(from_bare.into_channels()[0].id, "1");
    }

    #[test]
    fn name_presence_check_rejects_whitespace() {
        assert!(!ChannelFields::default().has_name());
        assert!(!ChannelFields {
            name: "   ".into(),
            description: None
        }
        .has_name());
        assert!(ChannelFields {
            name: "AI MCQ".into(),
            description: None
        }
        .has_name());
    }

    #[test]
    fn create_body_omits_absent_description() {
        let body = serde_json::to_value(ChannelFields {
            name: "AI MCQ".into(),
            description: None,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"name": "AI MCQ"}));
    }
}
