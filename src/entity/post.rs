//! Post entity: a climbing log a user writes at a center.

use sea_orm::entity::prelude::*;

use super::embedded::PostImages;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub center_id: Uuid,
    pub content: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub img: PostImages,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::center::Entity",
        from = "Column::CenterId",
        to = "super::center::Column::Id",
        on_delete = "Cascade"
    )]
    Center,
    #[sea_orm(has_many = "super::climbing_history::Entity")]
    ClimbingHistories,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Center.def()
    }
}

impl Related<super::climbing_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClimbingHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
