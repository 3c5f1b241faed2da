pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use cli::{Cli, ClientCommands, Commands, UserCommands};
pub use config::Config;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config)?;

    let Some(command) = cli.command else {
        return run_server(config).await;
    };

    match command {
        Commands::Serve => run_server(config).await,

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Created config.toml with default settings");
            } else {
                println!("config.toml already exists, leaving it untouched");
            }
            Ok(())
        }

        Commands::User { command } => {
            let state = SharedState::new(config).await?;
            run_user_command(&state, command).await
        }

        Commands::Client { command } => {
            let state = SharedState::new(config).await?;
            match command {
                ClientCommands::Add { username, name } => {
                    cli::cmd_client_add(&state, &username, &name).await
                }
            }
        }
    }
}

async fn run_user_command(state: &SharedState, command: UserCommands) -> anyhow::Result<()> {
    match command {
        UserCommands::List => cli::cmd_user_list(state).await,
        UserCommands::Show {
            username,
            with_client,
            xml,
        } => cli::cmd_user_show(state, &username, with_client, xml).await,
        UserCommands::Create {
            username,
            email,
            name,
            client_name,
        } => cli::cmd_user_create(state, username, email, name, client_name).await,
        UserCommands::Delete { username, yes } => cli::cmd_user_delete(state, &username, yes).await,
        UserCommands::TwoFactor {
            username,
            email,
            authenticator_secret,
            disable_authenticator,
        } => {
            cli::cmd_user_two_factor(
                state,
                &username,
                email,
                authenticator_secret,
                disable_authenticator,
            )
            .await
        }
        UserCommands::Activate { username } => {
            cli::cmd_user_set_enabled(state, &username, true).await
        }
        UserCommands::Deactivate { username } => {
            cli::cmd_user_set_enabled(state, &username, false).await
        }
        UserCommands::Promote { username, role } => {
            cli::cmd_user_promote(state, &username, &role).await
        }
        UserCommands::Demote { username, role } => {
            cli::cmd_user_demote(state, &username, &role).await
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("readshelf v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.server.enabled {
        info!("Server disabled in config, nothing to do");
        return Ok(());
    }

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);
    let app = api::router(api::create_app_state(shared));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("API server running at http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
