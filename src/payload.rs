//! Request bodies for the Push Kit API
//!
//! Everything here is a pure function of its inputs. Optional notification
//! fields are always serialized, as `null` when unset, so the `data` object
//! has the same keys on every message.

use serde::Serialize;

/// Optional `data` fields of a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationOptions {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub badge: Option<u32>,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub chat_id: Option<String>,
    pub avatar: Option<String>,
}

impl NotificationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn badge(mut self, badge: u32) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn post_id(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    pub fn comment_id(mut self, comment_id: impl Into<String>) -> Self {
        self.comment_id = Some(comment_id.into());
        self
    }

    pub fn chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// `message.data` of a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationData {
    pub title: String,
    pub message: String,
    #[serde(flatten)]
    pub options: NotificationOptions,
}

/// Recipient of a message: a single device or a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Serialized as `"token": [device]`
    Token(Vec<String>),
    Topic(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub data: NotificationData,
    #[serde(flatten)]
    pub target: Target,
}

/// Body of `POST /v1/{client_id}/messages:send`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub validate_only: bool,
    pub message: Message,
}

impl NotificationPayload {
    fn new(target: Target, title: &str, body: &str, options: &NotificationOptions) -> Self {
        Self {
            validate_only: false,
            message: Message {
                data: NotificationData {
                    title: title.to_string(),
                    message: body.to_string(),
                    options: options.clone(),
                },
                target,
            },
        }
    }
}

/// Notification addressed to one device token
pub fn build_device_notification(
    device_token: &str,
    title: &str,
    body: &str,
    options: &NotificationOptions,
) -> NotificationPayload {
    NotificationPayload::new(
        Target::Token(vec![device_token.to_string()]),
        title,
        body,
        options,
    )
}

/// Notification broadcast to every subscriber of `topic`
pub fn build_topic_notification(
    topic: &str,
    title: &str,
    body: &str,
    options: &NotificationOptions,
) -> NotificationPayload {
    NotificationPayload::new(Target::Topic(topic.to_string()), title, body, options)
}

/// One or more device tokens; a single token becomes a one-element list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceTokens(pub Vec<String>);

impl From<&str> for DeviceTokens {
    fn from(token: &str) -> Self {
        Self(vec![token.to_string()])
    }
}

impl From<String> for DeviceTokens {
    fn from(token: String) -> Self {
        Self(vec![token])
    }
}

impl From<Vec<String>> for DeviceTokens {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<&[String]> for DeviceTokens {
    fn from(tokens: &[String]) -> Self {
        Self(tokens.to_vec())
    }
}

impl From<&[&str]> for DeviceTokens {
    fn from(tokens: &[&str]) -> Self {
        Self(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DeviceTokens {
    fn from(tokens: [&str; N]) -> Self {
        Self(tokens.iter().map(|t| t.to_string()).collect())
    }
}

/// Body of `topic:subscribe` and `topic:unsubscribe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicRequest {
    pub topic: String,
    #[serde(rename = "tokenArray")]
    pub token_array: Vec<String>,
}

impl TopicRequest {
    pub fn new(topic: &str, tokens: impl Into<DeviceTokens>) -> Self {
        Self {
            topic: topic.to_string(),
            token_array: tokens.into().0,
        }
    }
}

/// Body of `topic:list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicListRequest {
    pub token: String,
}

impl TopicListRequest {
    pub fn new(device_token: &str) -> Self {
        Self {
            token: device_token.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_notification_shape() {
        let payload = build_device_notification("tok1", "T", "B", &NotificationOptions::default());

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "validate_only": false,
                "message": {
                    "data": {
                        "title": "T",
                        "message": "B",
                        "type": null,
                        "badge": null,
                        "post_id": null,
                        "comment_id": null,
                        "chat_id": null,
                        "avatar": null
                    },
                    "token": ["tok1"]
                }
            })
        );
    }

    #[test]
    fn test_topic_notification_shape() {
        let payload = build_topic_notification("news", "T", "B", &NotificationOptions::default());
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["message"]["topic"], "news");
        assert!(value["message"].get("token").is_none());
        assert_eq!(value["validate_only"], false);
        assert_eq!(value["message"]["data"]["title"], "T");
        assert_eq!(value["message"]["data"]["message"], "B");
        assert!(value["message"]["data"]["chat_id"].is_null());
    }

    #[test]
    fn test_options_fill_data_fields() {
        let options = NotificationOptions::new()
            .kind("comment")
            .badge(3)
            .post_id("42")
            .comment_id("7")
            .chat_id("c-1")
            .avatar("https://cdn.example.com/a.png");
        let payload = build_device_notification("tok1", "Hi", "There", &options);
        let data = &serde_json::to_value(&payload).unwrap()["message"]["data"];

        assert_eq!(data["type"], "comment");
        assert_eq!(data["badge"], 3);
        assert_eq!(data["post_id"], "42");
        assert_eq!(data["comment_id"], "7");
        assert_eq!(data["chat_id"], "c-1");
        assert_eq!(data["avatar"], "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_single_token_is_coerced_to_list() {
        let request = TopicRequest::new("news", "tokA");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"topic": "news", "tokenArray": ["tokA"]})
        );
    }

    #[test]
    fn test_many_tokens_keep_order() {
        let request = TopicRequest::new("news", ["a", "b", "c"]);
        assert_eq!(request.token_array, vec!["a", "b", "c"]);

        let owned = vec!["x".to_string(), "y".to_string()];
        let request = TopicRequest::new("news", owned.as_slice());
        assert_eq!(request.token_array, owned);
    }

    #[test]
    fn test_topic_list_shape() {
        let request = TopicListRequest::new("tokA");
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"token": "tokA"}));
    }
}
