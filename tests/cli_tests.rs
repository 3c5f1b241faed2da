use readshelf::config::Config;
use readshelf::models::Entry;
use readshelf::services::NewUser;
use readshelf::state::SharedState;
use sea_orm::ConnectionTrait;

async fn spawn_state() -> SharedState {
    let db_path = std::env::temp_dir().join(format!("readshelf-cli-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    SharedState::new(config).await.expect("failed to create state")
}

#[tokio::test]
async fn user_list_counts_entries() {
    let state = spawn_state().await;
    let user = state
        .user_service
        .register(NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            ..NewUser::default()
        })
        .await
        .unwrap();
    state
        .store
        .add_entry(user.id().unwrap(), &Entry::new("https://example.com"))
        .await
        .unwrap();

    assert!(readshelf::cli::cmd_user_list(&state).await.is_ok());
}

#[tokio::test]
async fn user_list_reports_storage_errors() {
    let state = spawn_state().await;
    state
        .user_service
        .register(NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            ..NewUser::default()
        })
        .await
        .unwrap();

    state
        .store
        .conn
        .execute_unprepared("DROP TABLE entries;")
        .await
        .unwrap();

    assert!(readshelf::cli::cmd_user_list(&state).await.is_err());
}
