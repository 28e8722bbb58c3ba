use crate::common::{
    FcmMessage, MulticastResponse, NotifyError, FCM_SCOPE, FCM_SEND_URL, MAX_MULTICAST_TOKENS,
};
use async_trait::async_trait;
use futures::future::join_all;
use gcloud_sdk::{GoogleAuthTokenGenerator, TokenSourceType};
use log::{debug, error};
use serde::Deserialize;
use serde_json::{json, Value};

/// Push provider seen by the handlers.
///
/// Implementations report failures but never retry them.
#[async_trait]
pub trait DispatchGateway: Send + Sync {
    async fn send_to_one(&self, message: &FcmMessage) -> Result<String, NotifyError>;

    async fn send_to_topic(&self, message: &FcmMessage) -> Result<String, NotifyError>;

    async fn send_multicast(&self, message: &FcmMessage)
        -> Result<MulticastResponse, NotifyError>;
}

/// Source of the `Authorization` header value for FCM requests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn authorization(&self) -> Result<String, NotifyError>;
}

#[async_trait]
impl AccessTokenSource for GoogleAuthTokenGenerator {
    async fn authorization(&self) -> Result<String, NotifyError> {
        let token = self
            .create_token()
            .await
            .map_err(|e| NotifyError::Dispatch(format!("failed to get access token: {:?}", e)))?;
        Ok(token.header_value())
    }
}

/// Fixed bearer token, for emulators and tests.
pub struct StaticToken(pub String);

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn authorization(&self) -> Result<String, NotifyError> {
        Ok(format!("Bearer {}", self.0))
    }
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

/// FCM HTTP v1 client.
pub struct FcmGateway {
    http: reqwest::Client,
    send_url: String,
    auth: Box<dyn AccessTokenSource>,
}

impl std::fmt::Debug for FcmGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FcmGateway: {}", self.send_url)
    }
}

impl FcmGateway {
    /// Gateway for `project_id` authenticated with application default credentials.
    pub async fn new(project_id: &str, http: reqwest::Client) -> Result<Self, NotifyError> {
        let auth =
            GoogleAuthTokenGenerator::new(TokenSourceType::Default, vec![FCM_SCOPE.to_string()])
                .await
                .map_err(|e| NotifyError::Dispatch(format!("failed to load credentials: {:?}", e)))?;

        Ok(FcmGateway::with_endpoint(
            send_url(project_id),
            http,
            Box::new(auth),
        ))
    }

    pub fn with_endpoint(
        send_url: String,
        http: reqwest::Client,
        auth: Box<dyn AccessTokenSource>,
    ) -> Self {
        FcmGateway {
            http,
            send_url,
            auth,
        }
    }

    async fn post(&self, authorization: &str, message: &FcmMessage) -> Result<String, NotifyError> {
        let res = self
            .http
            .post(&self.send_url)
            .header("Authorization", authorization)
            .header("Content-Type", "application/json")
            .json(&envelope(message))
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            let sent: SendResponse = res.json().await?;
            debug!("fcm accepted {}", sent.name);
            Ok(sent.name)
        } else {
            let text = res.text().await.unwrap_or_default();
            Err(NotifyError::Dispatch(format!("fcm responded {}: {}", status, text)))
        }
    }
}

#[async_trait]
impl DispatchGateway for FcmGateway {
    async fn send_to_one(&self, message: &FcmMessage) -> Result<String, NotifyError> {
        if message.token.is_none() {
            return Err(NotifyError::missing("token"));
        }
        let authorization = self.auth.authorization().await?;
        self.post(&authorization, message).await
    }

    async fn send_to_topic(&self, message: &FcmMessage) -> Result<String, NotifyError> {
        if message.topic.is_none() {
            return Err(NotifyError::missing("topic"));
        }
        let authorization = self.auth.authorization().await?;
        self.post(&authorization, message).await
    }

    async fn send_multicast(
        &self,
        message: &FcmMessage,
    ) -> Result<MulticastResponse, NotifyError> {
        let tokens = match &message.tokens {
            Some(t) if !t.is_empty() => t,
            _ => return Err(NotifyError::missing("tokens")),
        };
        if tokens.len() > MAX_MULTICAST_TOKENS {
            return Err(NotifyError::Dispatch(format!(
                "multicast supports at most {} tokens, got {}",
                MAX_MULTICAST_TOKENS,
                tokens.len()
            )));
        }

        let authorization = self.auth.authorization().await?;
        let singles: Vec<FcmMessage> = tokens
            .iter()
            .map(|t| FcmMessage::for_token(t, &message.notification))
            .collect();
        let results = join_all(singles.iter().map(|m| self.post(&authorization, m))).await;

        let mut response = MulticastResponse::default();
        for r in results {
            match r {
                Ok(_) => response.success_count += 1,
                Err(e) => {
                    debug!("multicast entry failed: {}", e);
                    response.failure_count += 1;
                }
            }
        }
        if response.failure_count > 0 {
            error!(
                "multicast delivered {}/{}",
                response.success_count,
                response.total()
            );
        }

        Ok(response)
    }
}

fn send_url(project_id: &str) -> String {
    format!("{}/{}/messages:send", FCM_SEND_URL, project_id)
}

fn envelope(message: &FcmMessage) -> Value {
    json!({ "message": message })
}
