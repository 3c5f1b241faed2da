use readshelf::db::Store;
use readshelf::entities::prelude::*;
use readshelf::models::{
    AuthenticatorTwoFactor, Client, EmailTwoFactor, Entry, SiteCredential, User, UserConfig,
    ROLE_USER,
};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

async fn spawn_store() -> Store {
    let db_path = std::env::temp_dir().join(format!("readshelf-test-{}.db", uuid::Uuid::new_v4()));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

async fn saved_user(store: &Store, username: &str) -> User {
    let mut user = User::new(username, format!("{username}@example.com"));
    store.save_user(&mut user).await.expect("failed to save user");
    user
}

#[tokio::test]
async fn save_assigns_id_and_timestamps() {
    let store = spawn_store().await;

    let mut user = User::new("alice", "alice@example.com");
    assert!(user.id().is_none());

    store.save_user(&mut user).await.unwrap();

    let id = user.id().expect("id assigned on insert");
    let created_at = user.created_at().expect("created_at set on save");
    assert_eq!(user.updated_at(), Some(created_at));

    user.set_name(Some("Alice".to_string()));
    store.save_user(&mut user).await.unwrap();

    assert_eq!(user.id(), Some(id));
    assert_eq!(user.created_at(), Some(created_at));
    assert!(user.updated_at().unwrap() >= created_at);

    let loaded = store.get_user(id).await.unwrap().unwrap();
    assert_eq!(loaded.name(), Some("Alice"));
    assert_eq!(loaded.created_at(), Some(created_at));
    assert!(loaded.roles().contains(ROLE_USER));
}

#[tokio::test]
async fn two_factor_state_round_trips() {
    let store = spawn_store().await;
    let mut user = saved_user(&store, "alice").await;

    user.set_email_two_factor(true);
    user.set_email_auth_code(123_456);
    user.set_google_authenticator_secret(Some("JBSWY3DPEHPK3PXP".to_string()));
    store.save_user(&mut user).await.unwrap();

    let loaded = store.get_user_by_username("alice").await.unwrap().unwrap();
    assert!(loaded.is_email_auth_enabled());
    assert_eq!(loaded.email_auth_code(), Some(123_456));
    assert!(loaded.is_google_authenticator_enabled());
    assert_eq!(loaded.google_authenticator_secret(), Some("JBSWY3DPEHPK3PXP"));
}

#[tokio::test]
async fn duplicate_username_or_email_is_rejected() {
    let store = spawn_store().await;
    saved_user(&store, "alice").await;

    let mut same_name = User::new("alice", "other@example.com");
    assert!(store.save_user(&mut same_name).await.is_err());

    let mut same_email = User::new("bob", "alice@example.com");
    assert!(store.save_user(&mut same_email).await.is_err());
}

#[tokio::test]
async fn owned_collections_load_in_insertion_order() {
    let store = spawn_store().await;
    let user = saved_user(&store, "alice").await;
    let id = user.id().unwrap();

    let first = store.add_client(id, &Client::generate("first")).await.unwrap();
    store.add_client(id, &Client::generate("second")).await.unwrap();
    store
        .add_entry(id, &Entry::new("https://example.com/a"))
        .await
        .unwrap();
    store
        .add_entry(id, &Entry::new("https://example.com/b"))
        .await
        .unwrap();
    store
        .set_user_config(id, &UserConfig::default())
        .await
        .unwrap();

    let loaded = store.get_user(id).await.unwrap().unwrap();

    assert_eq!(loaded.first_client(), Some(&first));
    assert_eq!(loaded.clients().len(), 2);
    let urls: Vec<_> = loaded.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
    assert_eq!(loaded.config().map(|c| c.items_per_page), Some(12));
    assert_eq!(store.count_entries(id).await.unwrap(), 2);

    let by_secret = store
        .find_user_by_client_secret(&first.secret)
        .await
        .unwrap()
        .unwrap();
    assert!(by_secret.is_equal_to(&loaded));
}

#[tokio::test]
async fn config_upsert_keeps_single_row() {
    let store = spawn_store().await;
    let id = saved_user(&store, "alice").await.id().unwrap();

    let first = store
        .set_user_config(id, &UserConfig::default())
        .await
        .unwrap();

    let mut changed = first.clone();
    changed.language = "de".to_string();
    let second = store.set_user_config(id, &changed).await.unwrap();

    assert_eq!(first.id, second.id);
    let loaded = store.get_user(id).await.unwrap().unwrap();
    assert_eq!(loaded.config().unwrap().language, "de");
}

#[tokio::test]
async fn delete_removes_user_and_everything_it_owns() {
    let store = spawn_store().await;
    let alice = saved_user(&store, "alice").await;
    let bob = saved_user(&store, "bob").await;
    let alice_id = alice.id().unwrap();
    let bob_id = bob.id().unwrap();

    for url in ["https://a.example", "https://b.example", "https://c.example"] {
        store.add_entry(alice_id, &Entry::new(url)).await.unwrap();
    }
    store
        .set_user_config(alice_id, &UserConfig::default())
        .await
        .unwrap();
    store
        .add_site_credential(
            alice_id,
            &SiteCredential::new("news.example", "alice", "hunter2"),
        )
        .await
        .unwrap();
    store
        .add_client(alice_id, &Client::generate("app"))
        .await
        .unwrap();
    store
        .add_entry(bob_id, &Entry::new("https://bob.example"))
        .await
        .unwrap();

    let report = store.delete_user(alice_id).await.unwrap().unwrap();

    assert_eq!(report.entries, 3);
    assert_eq!(report.config, 1);
    assert_eq!(report.site_credentials, 1);
    assert_eq!(report.clients, 1);
    assert!(store.get_user(alice_id).await.unwrap().is_none());
    assert_eq!(store.count_entries(alice_id).await.unwrap(), 0);

    let bob = store.get_user(bob_id).await.unwrap().unwrap();
    assert_eq!(bob.entries().len(), 1);
}

#[tokio::test]
async fn delete_missing_user_returns_none() {
    let store = spawn_store().await;
    assert!(store.delete_user(999).await.unwrap().is_none());
}

#[tokio::test]
async fn user_row_cannot_be_dropped_before_its_dependents() {
    let store = spawn_store().await;
    let id = saved_user(&store, "alice").await.id().unwrap();
    store
        .add_entry(id, &Entry::new("https://example.com"))
        .await
        .unwrap();

    let result = Users::delete_by_id(id).exec(&store.conn).await;
    assert!(result.is_err());
    assert!(store.get_user(id).await.unwrap().is_some());
}

#[tokio::test]
async fn list_users_is_ordered_by_id() {
    let store = spawn_store().await;
    saved_user(&store, "carol").await;
    saved_user(&store, "alice").await;

    let names: Vec<_> = store
        .list_users()
        .await
        .unwrap()
        .iter()
        .map(|u| u.username().to_string())
        .collect();
    assert_eq!(names, vec!["carol", "alice"]);
}

async fn reject_client_inserts(store: &Store) {
    store
        .conn
        .execute_unprepared(
            "CREATE TRIGGER reject_client_insert BEFORE INSERT ON oauth_clients \
             BEGIN SELECT RAISE(ABORT, 'client insert rejected'); END;",
        )
        .await
        .expect("failed to install trigger");
}

#[tokio::test]
async fn create_account_writes_user_config_and_client() {
    let store = spawn_store().await;

    let mut user = User::new("alice", "alice@example.com");
    let client = Client::generate("Default client");
    store
        .create_account(&mut user, &UserConfig::default(), &client)
        .await
        .unwrap();

    let id = user.id().expect("id assigned after commit");
    let loaded = store.get_user(id).await.unwrap().unwrap();
    assert!(loaded.config().is_some());
    assert_eq!(loaded.first_client().map(|c| c.secret.as_str()), Some(client.secret.as_str()));
}

#[tokio::test]
async fn failed_client_insert_leaves_no_account_behind() {
    let store = spawn_store().await;
    reject_client_inserts(&store).await;

    let mut user = User::new("alice", "alice@example.com");
    let result = store
        .create_account(&mut user, &UserConfig::default(), &Client::generate("app"))
        .await;

    assert!(result.is_err());
    assert!(user.id().is_none());
    assert!(store.get_user_by_username("alice").await.unwrap().is_none());
    assert_eq!(Users::find().count(&store.conn).await.unwrap(), 0);
    assert_eq!(UserConfigs::find().count(&store.conn).await.unwrap(), 0);
}

#[tokio::test]
async fn create_account_rejects_already_stored_user() {
    let store = spawn_store().await;
    let mut user = saved_user(&store, "alice").await;

    let result = store
        .create_account(&mut user, &UserConfig::default(), &Client::generate("app"))
        .await;

    assert!(result.is_err());
    assert_eq!(OauthClients::find().count(&store.conn).await.unwrap(), 0);
}
