//! API client command handlers

use crate::state::SharedState;

pub async fn cmd_client_add(state: &SharedState, username: &str, name: &str) -> anyhow::Result<()> {
    let client = state.user_service.create_client(username, name).await?;

    println!("✓ Created client '{}' for {username}", client.name);
    println!("  Client ID:     {}", client.public_id());
    println!("  Client secret: {}", client.secret);

    Ok(())
}
