//! CLI context: resolved configuration and logging setup

use anyhow::{Context, Result};
use huawei_push::{ClientConfig, FileConfig, PushClient};
use std::path::PathBuf;

/// CLI execution context shared by all handlers
pub struct CliContext {
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
    pub config: ClientConfig,
}

impl CliContext {
    /// Resolve the client configuration from the config file, the command
    /// line and the environment
    pub fn new(
        config_path: Option<PathBuf>,
        client_id: Option<String>,
        client_secret: Option<String>,
        verbose: bool,
    ) -> Result<Self> {
        let config_path = Self::resolve_config_path(config_path);

        let file_config = match &config_path {
            Some(path) => FileConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => FileConfig::default(),
        };

        let config = file_config
            .resolve(client_id, client_secret)
            .context("Failed to resolve Push Kit configuration")?;

        Ok(Self {
            config_path,
            verbose,
            config,
        })
    }

    /// An explicit path wins; otherwise use the default location if a file
    /// exists there
    fn resolve_config_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
        if config_path.is_some() {
            return config_path;
        }

        FileConfig::default_path().filter(|path| path.exists())
    }

    /// Initialize logging on stderr; `--verbose` enables debug output
    pub fn init_logging(verbose: bool) {
        let log_level = if verbose { "debug" } else { "warn" };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(log_level.parse().unwrap_or_else(|_| {
                        tracing::Level::WARN.into()
                    })),
            )
            .init();
    }

    pub fn client(&self) -> Result<PushClient> {
        if self.verbose {
            tracing::debug!("Config file: {:?}", self.config_path);
            tracing::debug!("Client config: {:?}", self.config);
        }

        PushClient::new(self.config.clone()).context("Failed to create Push Kit client")
    }
}
