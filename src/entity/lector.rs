//! Lector entity: a user's instructor/setter profile awaiting admin review.

use sea_orm::entity::prelude::*;

use super::embedded::{Careers, Certificates, Contests};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lectors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub is_setter: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub contest: Contests,
    #[sea_orm(column_type = "JsonBinary")]
    pub certificate: Certificates,
    #[sea_orm(column_type = "JsonBinary")]
    pub career: Careers,
    pub approved: bool,
    pub rejected: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(has_many = "super::lector_approved_file::Entity")]
    ApprovedFiles,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::lector_approved_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovedFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
