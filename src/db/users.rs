//! Database operations for users.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Column, Entity as User};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{OAuthUserInfo, Role, UserProfileDto};

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<user::Model>> {
    Ok(User::find_by_id(id).one(db).await?)
}

pub async fn exists_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<bool> {
    let count = User::find().filter(Column::Id.eq(id)).count(db).await?;
    Ok(count > 0)
}

pub async fn find_by_nickname<C: ConnectionTrait>(
    db: &C,
    nickname: &str,
) -> AppResult<Option<user::Model>> {
    Ok(User::find()
        .filter(Column::Nickname.eq(nickname))
        .one(db)
        .await?)
}

pub async fn exists_by_nickname<C: ConnectionTrait>(db: &C, nickname: &str) -> AppResult<bool> {
    let count = User::find()
        .filter(Column::Nickname.eq(nickname))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// True when another user already holds `nickname`. A user re-submitting their own
/// nickname during a second sign-up is not a duplicate.
pub async fn exists_by_nickname_for_other<C: ConnectionTrait>(
    db: &C,
    nickname: &str,
    user_id: Uuid,
) -> AppResult<bool> {
    let count = User::find()
        .filter(Column::Nickname.eq(nickname))
        .filter(Column::Id.ne(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn find_by_oauth_id_and_sns<C: ConnectionTrait>(
    db: &C,
    oauth_id: &str,
    sns: &str,
) -> AppResult<Option<user::Model>> {
    Ok(User::find()
        .filter(Column::OauthId.eq(oauth_id))
        .filter(Column::Sns.eq(sns))
        .one(db)
        .await?)
}

pub async fn find_by_oauth_id<C: ConnectionTrait>(
    db: &C,
    oauth_id: &str,
) -> AppResult<Option<user::Model>> {
    Ok(User::find()
        .filter(Column::OauthId.eq(oauth_id))
        .one(db)
        .await?)
}

/// All users, oldest first.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> AppResult<Vec<user::Model>> {
    Ok(User::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Insert a PENDING user for a first-time OAuth identity.
pub async fn create_pending<C: ConnectionTrait>(
    db: &C,
    info: &OAuthUserInfo,
) -> AppResult<user::Model> {
    let now = Utc::now();
    let model = ActiveModel {
        id: Set(Uuid::now_v7()),
        oauth_id: Set(info.oauth_id.clone()),
        sns: Set(info.sns.clone()),
        nickname: Set(None),
        profile_img: Set(info.profile_image.clone()),
        email: Set(info.email.clone()),
        instagram_name: Set(None),
        role: Set(Role::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(model.insert(db).await?)
}

/// Apply the sign-up profile and the new role in one update.
pub async fn update_profile_and_role<C: ConnectionTrait>(
    db: &C,
    user: user::Model,
    profile: &UserProfileDto,
    role: Role,
) -> AppResult<user::Model> {
    let mut active: ActiveModel = user.into();
    active.nickname = Set(Some(profile.nickname.clone()));
    active.profile_img = Set(profile.profile_image.clone());
    active.email = Set(profile.email.clone());
    active.instagram_name = Set(profile.instagram_nickname.clone());
    active.role = Set(role.as_str().to_string());
    active.updated_at = Set(Utc::now());

    Ok(active.update(db).await?)
}

pub async fn update_role<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    role: Role,
) -> AppResult<user::Model> {
    let user = find_by_id(db, id).await?.ok_or_else(|| {
        AppError::not_found(ErrorCode::DataDoesNotExist, format!("User {} not found", id))
    })?;

    let mut active: ActiveModel = user.into();
    active.role = Set(role.as_str().to_string());
    active.updated_at = Set(Utc::now());

    Ok(active.update(db).await?)
}
