//! Command definitions and structures for the CLI
//!
//! This module contains the clap-based argument definitions: the global
//! credential/config flags and one subcommand per client operation.

use clap::{Args, Parser, Subcommand};
use huawei_push::NotificationOptions;
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "huawei-push")]
#[command(about = "Send Huawei Push Kit notifications and manage topic subscriptions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Push Kit client (app) id [falls back to the config file, then
    /// HUAWEI_PUSH_KIT_CLIENT_ID]
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Push Kit client secret [falls back to the config file, then
    /// HUAWEI_PUSH_KIT_CLIENT_SECRET]
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a notification to a single device
    Send {
        /// Device push token
        token: String,
        /// Notification title
        title: String,
        /// Notification text
        body: String,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Send a notification to all subscribers of a topic
    SendTopic {
        /// Topic name
        topic: String,
        /// Notification title
        title: String,
        /// Notification text
        body: String,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Subscribe device tokens to a topic
    Subscribe {
        /// Topic name
        topic: String,
        /// One or more device tokens
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Unsubscribe device tokens from a topic
    Unsubscribe {
        /// Topic name
        topic: String,
        /// One or more device tokens
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// List the topics a device is subscribed to
    Topics {
        /// Device push token
        token: String,
    },

    /// Fetch an access token and show when it expires
    Token,
}

/// Optional notification data fields
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Notification type
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Badge count
    #[arg(long)]
    pub badge: Option<u32>,

    #[arg(long)]
    pub post_id: Option<String>,

    #[arg(long)]
    pub comment_id: Option<String>,

    #[arg(long)]
    pub chat_id: Option<String>,

    /// Avatar URL
    #[arg(long)]
    pub avatar: Option<String>,
}

impl From<OptionArgs> for NotificationOptions {
    fn from(args: OptionArgs) -> Self {
        Self {
            kind: args.kind,
            badge: args.badge,
            post_id: args.post_id,
            comment_id: args.comment_id,
            chat_id: args.chat_id,
            avatar: args.avatar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_parses_options() {
        let cli = Cli::try_parse_from([
            "huawei-push",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "send",
            "tok1",
            "Title",
            "Body",
            "--type",
            "comment",
            "--badge",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Send { token, options, .. } => {
                assert_eq!(token, "tok1");
                let options = NotificationOptions::from(options);
                assert_eq!(options.kind.as_deref(), Some("comment"));
                assert_eq!(options.badge, Some(2));
                assert!(options.avatar.is_none());
            }
            _ => panic!("expected send command"),
        }
    }

    #[test]
    fn test_credential_flags_default_to_none() {
        let cli = Cli::try_parse_from(["huawei-push", "token"]).unwrap();
        assert!(cli.client_id.is_none());
        assert!(cli.client_secret.is_none());
    }

    #[test]
    fn test_subscribe_requires_tokens() {
        assert!(Cli::try_parse_from(["huawei-push", "subscribe", "news"]).is_err());

        let cli = Cli::try_parse_from(["huawei-push", "subscribe", "news", "a", "b"]).unwrap();
        match cli.command {
            Commands::Subscribe { topic, tokens } => {
                assert_eq!(topic, "news");
                assert_eq!(tokens, vec!["a", "b"]);
            }
            _ => panic!("expected subscribe command"),
        }
    }
}
