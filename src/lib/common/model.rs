use crate::common::NotifyError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

impl NotificationPayload {
    pub fn new(title: Option<String>, body: Option<String>) -> Result<Self, NotifyError> {
        Ok(NotificationPayload {
            title: required(title, "title")?,
            body: required(body, "body")?,
        })
    }

    pub fn validate(&self) -> Result<(), NotifyError> {
        if self.title.is_empty() {
            return Err(NotifyError::missing("title"));
        }
        if self.body.is_empty() {
            return Err(NotifyError::missing("body"));
        }
        Ok(())
    }
}

/// Who a message is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    SingleToken(String),
    Topic(String),
    TokenList(Vec<String>),
}

impl Target {
    pub fn token(token: Option<String>) -> Result<Self, NotifyError> {
        required(token, "token").map(Target::SingleToken)
    }

    pub fn topic(topic: Option<String>) -> Result<Self, NotifyError> {
        required(topic, "topic").map(Target::Topic)
    }

    pub fn tokens(tokens: Option<Vec<String>>) -> Result<Self, NotifyError> {
        match tokens {
            Some(t) if !t.is_empty() => Ok(Target::TokenList(t)),
            _ => Err(NotifyError::missing("tokens")),
        }
    }
}

/// Provider-ready message. Exactly one of the addressing fields is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FcmMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    pub notification: NotificationPayload,
}

impl FcmMessage {
    pub fn for_token(token: &str, notification: &NotificationPayload) -> Self {
        FcmMessage {
            token: Some(token.to_string()),
            topic: None,
            tokens: None,
            notification: notification.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MulticastResponse {
    pub success_count: usize,
    pub failure_count: usize,
}

impl MulticastResponse {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub index: usize,
    pub size: usize,
    pub result: Result<MulticastResponse, NotifyError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDevice {
    #[serde(rename = "fcmToken", default, deserialize_with = "lenient_token")]
    pub fcm_token: Option<String>,
}

// a non-string fcmToken on one user reads as absent instead of failing the scan
fn lenient_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TokenField {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<TokenField>::deserialize(deserializer)? {
        Some(TokenField::Text(t)) => Some(t),
        Some(TokenField::Other(_)) | None => None,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, NotifyError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(NotifyError::missing(field)),
    }
}
