use serde::Serialize;
use std::sync::Arc;

use crate::config::{ClientConfig, Credentials};
use crate::errors::PushResult;
use crate::payload::{
    build_device_notification, build_topic_notification, DeviceTokens, NotificationOptions,
    TopicListRequest, TopicRequest,
};
use crate::response::ApiResponse;
use crate::token::{AccessToken, Clock, SystemClock, TokenManager};
use crate::transport::Transport;

/// Huawei Push Kit client
///
/// Owns the credentials and a cached OAuth access token. Every push or topic
/// operation first makes sure the cached token has at least five minutes of
/// validity left, refreshing it if needed, then issues exactly one API call.
///
/// The client is `Send + Sync`; token refreshes are serialized internally.
///
/// ```rust,no_run
/// use huawei_push::{NotificationOptions, PushClient};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Reads HUAWEI_PUSH_KIT_CLIENT_ID / HUAWEI_PUSH_KIT_CLIENT_SECRET
///     let client = PushClient::from_env()?;
///
///     let options = NotificationOptions::new().kind("comment").badge(1);
///     let response = client.send_push_notification("device-token", "Hello", "World", &options)?;
///     println!("{}", response.body);
///     Ok(())
/// }
/// ```
pub struct PushClient {
    credentials: Credentials,
    transport: Transport,
    tokens: TokenManager,
}

impl PushClient {
    /// Build a client; no network traffic happens until the first call
    pub fn new(config: ClientConfig) -> PushResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a client with a custom time source
    pub fn with_clock(config: ClientConfig, clock: Arc<dyn Clock>) -> PushResult<Self> {
        let transport = Transport::new(&config)?;

        Ok(Self {
            credentials: config.credentials,
            transport,
            tokens: TokenManager::new(clock),
        })
    }

    /// Production client with credentials from the environment
    pub fn from_env() -> PushResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Build a client and fetch its first access token immediately
    pub fn connect(config: ClientConfig) -> PushResult<Self> {
        let client = Self::new(config)?;
        client.ensure_valid_token()?;
        Ok(client)
    }

    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    /// Return a token valid for at least five more minutes, fetching a new
    /// one from the OAuth endpoint when necessary
    pub fn ensure_valid_token(&self) -> PushResult<String> {
        self.tokens
            .ensure_valid(|| self.transport.request_token(&self.credentials))
    }

    /// Currently cached token, if any
    pub fn cached_token(&self) -> Option<AccessToken> {
        self.tokens.cached()
    }

    /// Send an arbitrary `messages:send` payload
    pub fn send_push<P>(&self, payload: &P) -> PushResult<ApiResponse>
    where
        P: Serialize + ?Sized,
    {
        self.post(&format!("/v1/{}/messages:send", self.client_id()), payload)
    }

    /// Send a notification to one device
    pub fn send_push_notification(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        options: &NotificationOptions,
    ) -> PushResult<ApiResponse> {
        self.send_push(&build_device_notification(device_token, title, body, options))
    }

    /// Send a notification to every device subscribed to `topic`
    pub fn send_push_notification_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        options: &NotificationOptions,
    ) -> PushResult<ApiResponse> {
        self.send_push(&build_topic_notification(topic, title, body, options))
    }

    pub fn subscribe_to_topic(
        &self,
        topic: &str,
        device_tokens: impl Into<DeviceTokens>,
    ) -> PushResult<ApiResponse> {
        self.post(
            &format!("/v1/{}/topic:subscribe", self.client_id()),
            &TopicRequest::new(topic, device_tokens),
        )
    }

    pub fn unsubscribe_from_topic(
        &self,
        topic: &str,
        device_tokens: impl Into<DeviceTokens>,
    ) -> PushResult<ApiResponse> {
        self.post(
            &format!("/v1/{}/topic:unsubscribe", self.client_id()),
            &TopicRequest::new(topic, device_tokens),
        )
    }

    /// Topics a device is subscribed to
    pub fn topic_list(&self, device_token: &str) -> PushResult<ApiResponse> {
        self.post(
            &format!("/v1/{}/topic:list", self.client_id()),
            &TopicListRequest::new(device_token),
        )
    }

    fn post<B>(&self, path: &str, body: &B) -> PushResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let access_token = self.ensure_valid_token()?;
        self.transport.post_json(path, &access_token, body)
    }
}

impl std::fmt::Debug for PushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushClient")
            .field("credentials", &self.credentials)
            .field("tokens", &self.tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ClientConfig {
        ClientConfig::new(Credentials::new("10086", "s3cr3t-value").unwrap())
    }

    #[test]
    fn test_client_creation_is_lazy() {
        let client = PushClient::new(test_config()).unwrap();
        assert_eq!(client.client_id(), "10086");
        assert!(client.cached_token().is_none());
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PushClient>();
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = PushClient::new(test_config()).unwrap();
        assert!(!format!("{client:?}").contains("s3cr3t-value"));
    }
}
