//! User entity. One row per OAuth identity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub oauth_id: String,
    /// Account identifier at the OAuth provider (usually an email)
    pub sns: String,
    /// Set at sign-up; unique across users
    #[sea_orm(unique)]
    pub nickname: Option<String>,
    pub profile_img: Option<String>,
    pub email: Option<String>,
    pub instagram_name: Option<String>,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::center::Entity")]
    Centers,
    #[sea_orm(has_one = "super::lector::Entity")]
    Lector,
}

impl Related<super::center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Centers.def()
    }
}

impl Related<super::lector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
