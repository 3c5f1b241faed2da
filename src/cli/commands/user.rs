//! User account command handlers

use crate::cli::Toggle;
use crate::models::{AuthenticatorTwoFactor, EmailTwoFactor, Projection};
use crate::services::NewUser;
use crate::state::SharedState;

pub async fn cmd_user_list(state: &SharedState) -> anyhow::Result<()> {
    let users = state.user_service.list().await?;

    if users.is_empty() {
        println!("No users yet.");
        println!();
        println!("Create one with: readshelf user create <username> <email>");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let entries = match user.id() {
            Some(id) => state.store.count_entries(id).await?,
            None => 0,
        };

        let status = if user.is_enabled() { "✓" } else { "✗" };
        let mut two_factor = Vec::new();
        if user.is_email_auth_enabled() {
            two_factor.push("email");
        }
        if user.is_google_authenticator_enabled() {
            two_factor.push("authenticator");
        }

        println!("{} {} <{}>", status, user.username(), user.email());
        println!(
            "  ID: {} | Entries: {} | Roles: {} | 2FA: {}",
            user.id().map_or_else(|| "?".to_string(), |id| id.to_string()),
            entries,
            user.roles().iter().cloned().collect::<Vec<_>>().join(", "),
            if two_factor.is_empty() {
                "off".to_string()
            } else {
                two_factor.join(" + ")
            }
        );
    }

    println!();
    println!("Legend: ✓ Enabled | ✗ Disabled");

    Ok(())
}

pub async fn cmd_user_show(
    state: &SharedState,
    username: &str,
    with_client: bool,
    xml: bool,
) -> anyhow::Result<()> {
    let user = state.user_service.get(username).await?;
    let projection = if with_client {
        Projection::UserApiWithClient
    } else {
        Projection::UserApi
    };

    if xml {
        println!("{}", user.to_xml(projection)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&user.to_json(projection)?)?);
    }

    Ok(())
}

pub async fn cmd_user_create(
    state: &SharedState,
    username: String,
    email: String,
    name: Option<String>,
    client_name: Option<String>,
) -> anyhow::Result<()> {
    let user = state
        .user_service
        .register(NewUser {
            username,
            email,
            name,
            client_name,
        })
        .await?;

    println!("✓ Created user {}", user.username());
    if let Some(client) = user.first_client() {
        println!("  Client ID:     {}", client.public_id());
        println!("  Client secret: {}", client.secret);
    }

    Ok(())
}

pub async fn cmd_user_delete(state: &SharedState, username: &str, yes: bool) -> anyhow::Result<()> {
    let user = state.user_service.get(username).await?;

    if !yes {
        println!(
            "Delete '{}' and all {} entries, site credentials and API clients?",
            user.username(),
            user.entries().len()
        );
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = state.user_service.delete(username).await?;
    println!("✓ Deleted {username}");
    println!(
        "  Entries: {} | Config: {} | Site credentials: {} | Clients: {}",
        report.entries, report.config, report.site_credentials, report.clients
    );

    Ok(())
}

pub async fn cmd_user_two_factor(
    state: &SharedState,
    username: &str,
    email: Option<Toggle>,
    authenticator_secret: Option<String>,
    disable_authenticator: bool,
) -> anyhow::Result<()> {
    if email.is_none() && authenticator_secret.is_none() && !disable_authenticator {
        let user = state.user_service.get(username).await?;
        println!("Two-factor settings for {}", user.username());
        println!("  Email:         {}", on_off(user.is_email_auth_enabled()));
        println!(
            "  Authenticator: {}",
            on_off(user.is_google_authenticator_enabled())
        );
        return Ok(());
    }

    if let Some(toggle) = email {
        state
            .user_service
            .set_email_two_factor(username, toggle.enabled())
            .await?;
        println!("✓ Email two-factor {}", on_off(toggle.enabled()));
    }

    if let Some(secret) = authenticator_secret {
        let user = state
            .user_service
            .set_authenticator_secret(username, Some(secret))
            .await?;
        println!(
            "✓ Authenticator two-factor {}",
            on_off(user.is_google_authenticator_enabled())
        );
    } else if disable_authenticator {
        state
            .user_service
            .set_authenticator_secret(username, None)
            .await?;
        println!("✓ Authenticator two-factor off");
    }

    Ok(())
}

pub async fn cmd_user_set_enabled(
    state: &SharedState,
    username: &str,
    enabled: bool,
) -> anyhow::Result<()> {
    let user = state.user_service.set_enabled(username, enabled).await?;
    if user.is_enabled() {
        println!("✓ {} has been activated", user.username());
    } else {
        println!("✓ {} has been deactivated", user.username());
    }
    Ok(())
}

pub async fn cmd_user_promote(state: &SharedState, username: &str, role: &str) -> anyhow::Result<()> {
    let user = state.user_service.add_role(username, role).await?;
    println!(
        "✓ {} now has roles: {}",
        user.username(),
        user.roles().iter().cloned().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

pub async fn cmd_user_demote(state: &SharedState, username: &str, role: &str) -> anyhow::Result<()> {
    let user = state.user_service.remove_role(username, role).await?;
    println!(
        "✓ {} now has roles: {}",
        user.username(),
        user.roles().iter().cloned().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
