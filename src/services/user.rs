//! Sign-in, sign-up and user-side uploads.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::TransactionTrait;
use tracing::info;

use crate::auth::ensure_can_sign_up;
use crate::db::{
    DbPool, center_approved_files, center_fees, center_holds, center_walls, centers,
    lector_approved_files, lectors, users,
};
use crate::entity::user;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    CenterAuthRequest, CenterResponse, FileUpload, IsDuplicatedNicknameResponse, JwtResponse,
    LectorRequest, LectorResponse, LectorUploadPurpose, OAuthProvider, OAuthUserInfo,
    RequestUser, Role, SignInRequest, UploadFileResponse, UserProfileDto, UserProfileResponse,
};
use crate::services::jwt::JwtManager;
use crate::services::oauth::OAuthUserInfoProviderSupplier;
use crate::services::storage::{FileStorage, store_upload};
use crate::services::tasks::{BackgroundTask, SignUpKind, TaskQueue};

/// Provider tag recorded for accounts created through the development sign-in.
const TEST_SNS: &str = "test";

#[derive(Clone)]
pub struct UserService {
    pool: DbPool,
    jwt: JwtManager,
    oauth: OAuthUserInfoProviderSupplier,
    storage: Arc<dyn FileStorage>,
    tasks: TaskQueue,
    max_upload_size: usize,
}

impl UserService {
    pub fn new(
        pool: DbPool,
        jwt: JwtManager,
        oauth: OAuthUserInfoProviderSupplier,
        storage: Arc<dyn FileStorage>,
        tasks: TaskQueue,
        max_upload_size: usize,
    ) -> Self {
        Self {
            pool,
            jwt,
            oauth,
            storage,
            tasks,
            max_upload_size,
        }
    }

    /// Exchange a provider token for a session, creating a PENDING user on first sign-in.
    pub async fn sign_in(
        &self,
        provider: OAuthProvider,
        request: SignInRequest,
    ) -> AppResult<JwtResponse> {
        let info = self
            .oauth
            .get_provider(provider)?
            .get_user_info(&request.token)
            .await?;
        self.sign_in_with(info).await
    }

    /// Development-only sign-in: the token is taken as the oauth id of a test account.
    pub async fn test_sign_in(&self, request: SignInRequest) -> AppResult<JwtResponse> {
        if request.token.trim().is_empty() {
            return Err(AppError::invalid_format("token must not be blank"));
        }
        self.sign_in_with(OAuthUserInfo {
            oauth_id: request.token,
            sns: TEST_SNS.to_string(),
            email: None,
            nickname: None,
            profile_image: None,
        })
        .await
    }

    async fn sign_in_with(&self, info: OAuthUserInfo) -> AppResult<JwtResponse> {
        let db = self.pool.connection();
        let user = match users::find_by_oauth_id_and_sns(db, &info.oauth_id, &info.sns).await? {
            Some(user) => user,
            None => {
                let user = users::create_pending(db, &info).await?;
                info!(user_id = %user.id, sns = %user.sns, "Created pending user");
                user
            }
        };

        let role = Role::of(&user);
        let tokens = self.jwt.issue(user.id, &user.sns, role)?;

        Ok(JwtResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            is_signed_up: role.is_signed_up(),
            profile: UserProfileResponse::from_entity(&user),
        })
    }

    pub async fn check_nickname_duplication(
        &self,
        nickname: &str,
    ) -> AppResult<IsDuplicatedNicknameResponse> {
        let is_duplicated = users::exists_by_nickname(self.pool.connection(), nickname).await?;
        Ok(IsDuplicatedNicknameResponse { is_duplicated })
    }

    /// Checks shared by both sign-up flows, before anything is written.
    async fn check_sign_up(
        &self,
        subject: &RequestUser,
        profile: &UserProfileDto,
        target: Role,
    ) -> AppResult<user::Model> {
        ensure_can_sign_up(subject, target)?;

        let db = self.pool.connection();
        if users::exists_by_nickname_for_other(db, &profile.nickname, subject.id).await? {
            return Err(AppError::bad_request(
                ErrorCode::DuplicatedNickname,
                format!("Nickname '{}' is already taken", profile.nickname),
            ));
        }

        let user = users::find_by_id(db, subject.id).await?.ok_or_else(|| {
            AppError::not_found(
                ErrorCode::DataDoesNotExist,
                format!("User {} not found", subject.id),
            )
        })?;

        // The token may predate an earlier sign-up, so the stored state has the last word.
        if Role::of(&user).is_signed_up()
            || centers::exists_by_user_id(db, user.id).await?
            || lectors::exists_by_user_id(db, user.id).await?
        {
            return Err(AppError::bad_request(
                ErrorCode::UserAlreadySignedUp,
                "User already has a center or lector profile",
            ));
        }

        Ok(user)
    }

    /// Register the subject as a center admin together with the full center graph.
    pub async fn sign_up_center(
        &self,
        subject: &RequestUser,
        request: CenterAuthRequest,
    ) -> AppResult<CenterResponse> {
        request.validate()?;
        let user = self
            .check_sign_up(subject, &request.profile, Role::CenterAdmin)
            .await?;

        let now = Utc::now();
        let center = request.to_center(user.id, now);

        let txn = self.pool.connection().begin().await?;
        let center = centers::save(&txn, &center).await?;
        let fees = center_fees::save_all(&txn, request.to_fees(center.id)).await?;
        let holds = center_holds::save_all(&txn, request.to_holds(center.id)).await?;
        let walls = center_walls::save_all(&txn, request.to_walls(center.id)).await?;
        center_approved_files::save_all(&txn, request.to_approved_files(center.id, user.id, now))
            .await?;
        users::update_profile_and_role(&txn, user, &request.profile, Role::CenterAdmin).await?;
        txn.commit().await?;

        info!(user_id = %subject.id, center_id = %center.id, "Center sign-up submitted");
        self.tasks.dispatch(BackgroundTask::SignUpSubmitted {
            kind: SignUpKind::Center,
            id: center.id,
        });

        Ok(CenterResponse::from_entity(&center, &fees, &holds, &walls))
    }

    /// Register the subject as a lector.
    pub async fn sign_up_lector(
        &self,
        subject: &RequestUser,
        request: LectorRequest,
    ) -> AppResult<LectorResponse> {
        request.validate()?;
        let user = self
            .check_sign_up(subject, &request.profile, Role::Lector)
            .await?;

        let now = Utc::now();
        let lector = request.to_lector(user.id, now);

        let txn = self.pool.connection().begin().await?;
        let lector = lectors::save(&txn, &lector).await?;
        let files =
            lector_approved_files::save_all(&txn, request.to_approved_files(lector.id, user.id, now))
                .await?;
        users::update_profile_and_role(&txn, user, &request.profile, Role::Lector).await?;
        txn.commit().await?;

        info!(user_id = %subject.id, lector_id = %lector.id, "Lector sign-up submitted");
        self.tasks.dispatch(BackgroundTask::SignUpSubmitted {
            kind: SignUpKind::Lector,
            id: lector.id,
        });

        Ok(LectorResponse::from_entity(&lector, &files))
    }

    pub async fn upload_profile(&self, upload: FileUpload) -> AppResult<UploadFileResponse> {
        let file_url = store_upload(
            self.storage.as_ref(),
            self.max_upload_size,
            "user",
            "profile",
            false,
            upload,
        )
        .await?;
        Ok(UploadFileResponse { file_url })
    }

    pub async fn upload_file(
        &self,
        purpose: LectorUploadPurpose,
        upload: FileUpload,
    ) -> AppResult<UploadFileResponse> {
        let file_url = store_upload(
            self.storage.as_ref(),
            self.max_upload_size,
            "user",
            purpose.as_str(),
            true,
            upload,
        )
        .await?;
        Ok(UploadFileResponse { file_url })
    }
}
