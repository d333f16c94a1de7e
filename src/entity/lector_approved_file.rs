//! Proof documents submitted with a lector sign-up.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lector_approved_files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub lector_id: Uuid,
    pub user_id: Uuid,
    pub url: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lector::Entity",
        from = "Column::LectorId",
        to = "super::lector::Column::Id",
        on_delete = "Cascade"
    )]
    Lector,
}

impl Related<super::lector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
