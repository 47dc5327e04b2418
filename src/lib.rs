//! Huawei Push Kit client library
//!
//! Authenticates with the OAuth2 client-credentials flow, caches the bearer
//! token until shortly before it expires, and sends notifications to devices
//! or topics and manages topic subscriptions.

pub mod client;
pub mod config;
pub mod errors;
pub mod payload;
pub mod response;
pub mod token;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::PushClient;
pub use config::{ClientConfig, Credentials, FileConfig};
pub use errors::{PushError, PushResult};
pub use payload::{DeviceTokens, NotificationOptions, NotificationPayload};
pub use response::{ApiResponse, PushResponse};
pub use token::{AccessToken, Clock, SystemClock};
