//! Command handlers for all CLI operations
//!
//! Each handler maps one subcommand onto a [`PushClient`] call and prints the
//! response status and body.

use super::{CliContext, Commands};
use anyhow::Result;
use huawei_push::{ApiResponse, NotificationOptions, PushClient};
use tracing::info;

/// Routes parsed commands to the client
pub struct CommandHandler {
    client: PushClient,
}

impl CommandHandler {
    pub fn new(context: &CliContext) -> Result<Self> {
        Ok(Self {
            client: context.client()?,
        })
    }

    /// Route commands to their appropriate handlers
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Send {
                token,
                title,
                body,
                options,
            } => {
                let options = NotificationOptions::from(options);
                info!(title = %title, "Sending notification to device");
                let response = self
                    .client
                    .send_push_notification(&token, &title, &body, &options)?;
                print_response(&response);
            }
            Commands::SendTopic {
                topic,
                title,
                body,
                options,
            } => {
                let options = NotificationOptions::from(options);
                info!(topic = %topic, "Sending notification to topic");
                let response = self
                    .client
                    .send_push_notification_to_topic(&topic, &title, &body, &options)?;
                print_response(&response);
            }
            Commands::Subscribe { topic, tokens } => {
                info!(topic = %topic, count = tokens.len(), "Subscribing tokens");
                print_response(&self.client.subscribe_to_topic(&topic, tokens)?);
            }
            Commands::Unsubscribe { topic, tokens } => {
                info!(topic = %topic, count = tokens.len(), "Unsubscribing tokens");
                print_response(&self.client.unsubscribe_from_topic(&topic, tokens)?);
            }
            Commands::Topics { token } => {
                print_response(&self.client.topic_list(&token)?);
            }
            Commands::Token => self.handle_token()?,
        }

        Ok(())
    }

    fn handle_token(&self) -> Result<()> {
        self.client.ensure_valid_token()?;

        if let Some(token) = self.client.cached_token() {
            println!("Access token acquired");
            println!("Expires at: {}", token.expires_at.to_rfc3339());
        }

        Ok(())
    }
}

fn print_response(response: &ApiResponse) {
    println!("HTTP {}", response.status);

    match response.value() {
        Ok(value) => println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| response.body.clone())
        ),
        Err(_) => println!("{}", response.body),
    }
}
