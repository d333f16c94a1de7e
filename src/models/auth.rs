//! Authentication models: the request subject, OAuth identity and token pair.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::user::{Role, UserProfileResponse};

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUser {
    pub id: Uuid,
    pub sns: String,
    pub role: Role,
}

impl RequestUser {
    pub fn new(id: Uuid, sns: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            sns: sns.into(),
            role,
        }
    }
}

/// Supported OAuth identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Kakao,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Kakao => "kakao",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "google" => Some(Self::Google),
            "kakao" => Some(Self::Kakao),
            _ => None,
        }
    }
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized identity returned by any OAuth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthUserInfo {
    pub oauth_id: String,
    pub sns: String,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
}

/// Sign-in request carrying the provider-issued token.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub token: String,
}

/// Token pair issued after sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JwtResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub is_signed_up: bool,
    pub profile: UserProfileResponse,
}
