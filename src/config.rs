use crate::errors::{PushError, PushResult};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable holding the Push Kit client (app) id
pub const CLIENT_ID_ENV: &str = "HUAWEI_PUSH_KIT_CLIENT_ID";
/// Environment variable holding the Push Kit client secret
pub const CLIENT_SECRET_ENV: &str = "HUAWEI_PUSH_KIT_CLIENT_SECRET";

pub const DEFAULT_OAUTH_URL: &str = "https://oauth-login.cloud.huawei.com";
pub const DEFAULT_PUSH_API_URL: &str = "https://push-api.cloud.huawei.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OAuth client credentials used for the client-credentials grant
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Build credentials from explicit values
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Config`] if either value is empty.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> PushResult<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(PushError::config("client_id must not be empty"));
        }
        if client_secret.trim().is_empty() {
            return Err(PushError::config("client_secret must not be empty"));
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Read both values from `HUAWEI_PUSH_KIT_CLIENT_ID` and
    /// `HUAWEI_PUSH_KIT_CLIENT_SECRET`
    pub fn from_env() -> PushResult<Self> {
        Self::resolve(None, None)
    }

    /// Resolve each value from its explicit argument, falling back to the
    /// environment variable when the argument is `None`
    pub fn resolve(client_id: Option<String>, client_secret: Option<String>) -> PushResult<Self> {
        Self::resolve_with(client_id, client_secret, |name| std::env::var(name).ok())
    }

    /// Same as [`Credentials::resolve`] with a custom variable lookup
    pub fn resolve_with<F>(
        client_id: Option<String>,
        client_secret: Option<String>,
        lookup: F,
    ) -> PushResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = non_empty(client_id)
            .or_else(|| non_empty(lookup(CLIENT_ID_ENV)))
            .ok_or_else(|| {
                PushError::config(format!("client_id not supplied and {CLIENT_ID_ENV} is not set"))
            })?;
        let client_secret = non_empty(client_secret)
            .or_else(|| non_empty(lookup(CLIENT_SECRET_ENV)))
            .ok_or_else(|| {
                PushError::config(format!(
                    "client_secret not supplied and {CLIENT_SECRET_ENV} is not set"
                ))
            })?;

        Self::new(client_id, client_secret)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Runtime configuration for [`crate::PushClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub oauth_url: Url,
    pub push_api_url: Url,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Configuration pointing at the production Huawei hosts
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            oauth_url: default_url(DEFAULT_OAUTH_URL),
            push_api_url: default_url(DEFAULT_PUSH_API_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: Some(concat!("huawei-push/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }

    /// Production configuration with credentials taken from the environment
    pub fn from_env() -> PushResult<Self> {
        Ok(Self::new(Credentials::from_env()?))
    }

    pub fn with_oauth_url(mut self, url: &str) -> PushResult<Self> {
        self.oauth_url = Url::parse(url)?;
        Ok(self)
    }

    pub fn with_push_api_url(mut self, url: &str) -> PushResult<Self> {
        self.push_api_url = Url::parse(url)?;
        Ok(self)
    }

    /// Per-request timeout in seconds; must be positive
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> PushResult<Self> {
        if timeout_secs == 0 {
            return Err(PushError::config("timeout_secs must be greater than 0"));
        }
        self.timeout_secs = timeout_secs;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_url(raw: &'static str) -> Url {
    Url::parse(raw).expect("built-in endpoint URL is valid")
}

/// On-disk TOML configuration
///
/// Every field is optional. Credentials missing from the file fall back to
/// the environment when the file is resolved into a [`ClientConfig`].
///
/// ```toml
/// client_id = "103000000"
/// client_secret = "..."
/// push_api_url = "https://push-api.cloud.huawei.com"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub oauth_url: Option<String>,
    pub push_api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Default location: `<config dir>/huawei-push/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.config_dir().join("huawei-push").join("config.toml"))
    }

    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> PushResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PushError::config_with_source(format!("failed to read {}", path.display()), e)
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Merge into a [`ClientConfig`]
    ///
    /// Explicit credentials win over the file, which wins over the
    /// environment. Callers must pass only values the user actually gave
    /// (e.g. command-line flags), never values read from the environment.
    pub fn resolve(
        self,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> PushResult<ClientConfig> {
        let credentials = Credentials::resolve(
            non_empty(client_id).or(self.client_id),
            non_empty(client_secret).or(self.client_secret),
        )?;

        let mut config = ClientConfig::new(credentials);
        if let Some(url) = &self.oauth_url {
            config = config.with_oauth_url(url)?;
        }
        if let Some(url) = &self.push_api_url {
            config = config.with_push_api_url(url)?;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config = config.with_timeout_secs(timeout_secs)?;
        }

        Ok(config)
    }
}
