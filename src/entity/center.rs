//! Center entity: a climbing gym owned by its center admin.

use sea_orm::entity::prelude::*;

use super::embedded::{CenterFeeImages, CenterImages, OperatingTimes, Utilities};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "centers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub profile_img: String,
    pub address: String,
    pub detail_address: Option<String>,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_name: Option<String>,
    pub youtube_url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub center_img: CenterImages,
    #[sea_orm(column_type = "JsonBinary")]
    pub operating_time: OperatingTimes,
    #[sea_orm(column_type = "JsonBinary")]
    pub utility: Utilities,
    #[sea_orm(column_type = "JsonBinary")]
    pub fee_img: CenterFeeImages,
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
    #[sea_orm(has_many = "super::center_fee::Entity")]
    Fees,
    #[sea_orm(has_many = "super::center_hold::Entity")]
    Holds,
    #[sea_orm(has_many = "super::center_wall::Entity")]
    Walls,
    #[sea_orm(has_many = "super::center_approved_file::Entity")]
    ApprovedFiles,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::center_fee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fees.def()
    }
}

impl Related<super::center_hold::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holds.def()
    }
}

impl Related<super::center_wall::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Walls.def()
    }
}

impl Related<super::center_approved_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovedFiles.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
