use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub hashed_password: String,

    pub is_active: bool,

    pub is_superuser: bool,

    pub is_verified: bool,

    /// Bearer token (64-char hex string)
    #[sea_orm(unique)]
    pub api_key: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_watchlist::Entity")]
    UserWatchlist,
}

impl Related<super::user_watchlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserWatchlist.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_watchlist::Relation::Movie.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_watchlist::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
