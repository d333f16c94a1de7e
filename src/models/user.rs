//! User role and profile models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::user;
use crate::error::AppResult;
use crate::models::validation;

/// User roles. PENDING until the user signs up as a lector or center admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Pending,
    Lector,
    CenterAdmin,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Lector => "LECTOR",
            Self::CenterAdmin => "CENTER_ADMIN",
            Self::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "LECTOR" => Some(Self::Lector),
            "CENTER_ADMIN" => Some(Self::CenterAdmin),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Stored role of a user row. Unknown values degrade to PENDING.
    pub fn of(model: &user::Model) -> Self {
        Self::parse(&model.role).unwrap_or_else(|| {
            tracing::warn!(user_id = %model.id, role = %model.role, "Unknown stored role");
            Self::Pending
        })
    }

    /// Whether the user finished a sign-up flow.
    pub fn is_signed_up(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile fields submitted with either sign-up flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub profile_image: Option<String>,
    pub nickname: String,
    pub email: Option<String>,
    pub instagram_nickname: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserProfileDto {
    pub fn validate(&self) -> AppResult<()> {
        validation::nickname(&self.nickname)?;
        if let Some(email) = &self.email {
            validation::email(email)?;
        }
        Ok(())
    }
}

/// Profile as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    pub profile_image: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub instagram_nickname: Option<String>,
    pub role: Role,
}

impl UserProfileResponse {
    pub fn from_entity(model: &user::Model) -> Self {
        Self {
            profile_image: model.profile_img.clone(),
            nickname: model.nickname.clone(),
            email: model.email.clone(),
            instagram_nickname: model.instagram_name.clone(),
            role: Role::of(model),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IsDuplicatedNicknameResponse {
    pub is_duplicated: bool,
}
