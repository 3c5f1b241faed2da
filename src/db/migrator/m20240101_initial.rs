use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).text().null())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::LastLogin).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Users::Roles).text().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Child tables reference users without ON DELETE CASCADE: the store
        // removes dependents explicitly before the user row.
        manager
            .create_table(
                Table::create()
                    .table(UserConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserConfigs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserConfigs::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserConfigs::Theme).string().not_null())
                    .col(ColumnDef::new(UserConfigs::ItemsPerPage).integer().not_null())
                    .col(ColumnDef::new(UserConfigs::Language).string().not_null())
                    .col(ColumnDef::new(UserConfigs::ReadingSpeed).integer().not_null())
                    .col(ColumnDef::new(UserConfigs::FeedToken).string().null())
                    .col(ColumnDef::new(UserConfigs::FeedLimit).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_configs_user_id")
                            .from(UserConfigs::Table, UserConfigs::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::UserId).integer().not_null())
                    .col(ColumnDef::new(Entries::Url).text().not_null())
                    .col(ColumnDef::new(Entries::Title).text().null())
                    .col(
                        ColumnDef::new(Entries::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Entries::IsStarred)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Entries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entries_user_id")
                            .from(Entries::Table, Entries::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteCredentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteCredentials::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SiteCredentials::UserId).integer().not_null())
                    .col(ColumnDef::new(SiteCredentials::Host).string().not_null())
                    .col(ColumnDef::new(SiteCredentials::Username).text().not_null())
                    .col(ColumnDef::new(SiteCredentials::Password).text().not_null())
                    .col(
                        ColumnDef::new(SiteCredentials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_site_credentials_user_id")
                            .from(SiteCredentials::Table, SiteCredentials::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OauthClients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OauthClients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OauthClients::UserId).integer().not_null())
                    .col(ColumnDef::new(OauthClients::Name).text().not_null())
                    .col(ColumnDef::new(OauthClients::RandomId).string().not_null())
                    .col(
                        ColumnDef::new(OauthClients::Secret)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(OauthClients::RedirectUris)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oauth_clients_user_id")
                            .from(OauthClients::Table, OauthClients::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entries_user_id")
                    .table(Entries::Table)
                    .col(Entries::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_site_credentials_user_id")
                    .table(SiteCredentials::Table)
                    .col(SiteCredentials::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_oauth_clients_user_id")
                    .table(OauthClients::Table)
                    .col(OauthClients::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OauthClients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteCredentials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Username,
    Email,
    Enabled,
    LastLogin,
    Roles,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserConfigs {
    Table,
    Id,
    UserId,
    Theme,
    ItemsPerPage,
    Language,
    ReadingSpeed,
    FeedToken,
    FeedLimit,
}

#[derive(DeriveIden)]
enum Entries {
    Table,
    Id,
    UserId,
    Url,
    Title,
    IsArchived,
    IsStarred,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SiteCredentials {
    Table,
    Id,
    UserId,
    Host,
    Username,
    Password,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OauthClients {
    Table,
    Id,
    UserId,
    Name,
    RandomId,
    Secret,
    RedirectUris,
}
