use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub name: Option<String>,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    pub enabled: bool,

    pub last_login: Option<DateTimeUtc>,

    /// JSON array of role labels
    pub roles: String,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,

    /// Pending email two-factor code
    pub auth_code: Option<i32>,

    pub google_authenticator_secret: Option<String>,

    pub email_two_factor: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entries::Entity")]
    Entries,
    #[sea_orm(has_one = "super::user_configs::Entity")]
    Config,
    #[sea_orm(has_many = "super::site_credentials::Entity")]
    SiteCredentials,
    #[sea_orm(has_many = "super::oauth_clients::Entity")]
    Clients,
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl Related<super::user_configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Config.def()
    }
}

impl Related<super::site_credentials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SiteCredentials.def()
    }
}

impl Related<super::oauth_clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
