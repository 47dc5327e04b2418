//! CLI module providing command-line interface functionality
//!
//! This module handles argument parsing, configuration resolution, and
//! routing to the command handler.

pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

pub use commands::{Cli, Commands};
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and execute the requested command
    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        CliContext::init_logging(cli.verbose);

        let context = CliContext::new(cli.config, cli.client_id, cli.client_secret, cli.verbose)?;
        let handler = CommandHandler::new(&context)?;

        handler.handle_command(cli.command)
    }
}
