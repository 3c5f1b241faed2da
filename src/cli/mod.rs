//! CLI module - Command-line interface for readshelf
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// readshelf - self-hosted read-it-later accounts
#[derive(Parser)]
#[command(name = "readshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to the standard search paths)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    #[command(alias = "daemon")]
    Serve,

    /// Create default config file
    Init,

    /// Manage user accounts
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage API clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all accounts
    #[command(alias = "ls")]
    List,

    /// Show one account as the API would render it
    Show {
        username: String,
        /// Include the first API client
        #[arg(long)]
        with_client: bool,
        /// Render as XML instead of JSON
        #[arg(long)]
        xml: bool,
    },

    /// Create an account with its default config and API client
    Create {
        username: String,
        email: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Name of the API client created with the account
        #[arg(long)]
        client_name: Option<String>,
    },

    /// Delete an account and everything it owns
    #[command(alias = "rm")]
    Delete {
        username: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Configure two-factor authentication
    TwoFactor {
        username: String,
        /// Email code challenge
        #[arg(long, value_enum)]
        email: Option<Toggle>,
        /// Authenticator app secret (enables the method)
        #[arg(long, conflicts_with = "disable_authenticator")]
        authenticator_secret: Option<String>,
        /// Remove the authenticator secret
        #[arg(long)]
        disable_authenticator: bool,
    },

    /// Enable an account
    Activate { username: String },

    /// Disable an account
    Deactivate { username: String },

    /// Grant a role
    Promote {
        username: String,
        #[arg(default_value = "ROLE_SUPER_ADMIN")]
        role: String,
    },

    /// Revoke a role
    Demote {
        username: String,
        #[arg(default_value = "ROLE_SUPER_ADMIN")]
        role: String,
    },
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Create an API client for a user
    Add { username: String, name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    #[must_use]
    pub const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

pub use commands::*;
