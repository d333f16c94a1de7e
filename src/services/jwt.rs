//! HS256 access/refresh token issuance and verification.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{RequestUser, Role};

/// JWT issuer claim.
const TOKEN_ISSUER: &str = "claon-admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub sns: String,
    pub role: Role,
    pub token_type: TokenType,
}

/// Issued token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies the service's own session tokens.
#[derive(Clone)]
pub struct JwtManager {
    secret: SecretString,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl JwtManager {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            access_ttl_secs: settings.access_token_ttl_secs,
            refresh_ttl_secs: settings.refresh_token_ttl_secs,
        }
    }

    /// Issue an access/refresh pair for a user with the given role.
    pub fn issue(&self, user_id: Uuid, sns: &str, role: Role) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_token(user_id, sns, role, TokenType::Access)?,
            refresh_token: self.create_token(user_id, sns, role, TokenType::Refresh)?,
        })
    }

    fn create_token(
        &self,
        user_id: Uuid,
        sns: &str,
        role: Role,
        token_type: TokenType,
    ) -> AppResult<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
        };
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(ttl as i64);

        let claims = TokenClaims {
            sub: user_id.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            sns: sns.to_string(),
            role,
            token_type,
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::default(), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn decode(&self, token: &str) -> AppResult<TokenClaims> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.validate_aud = false;

        decode::<TokenClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(ErrorCode::InvalidJwt, format!("Invalid token: {}", e)))
    }

    /// Verify an access token and turn its claims into the request subject.
    pub fn verify_access_token(&self, token: &str) -> AppResult<RequestUser> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized(
                ErrorCode::InvalidJwt,
                "Refresh token cannot be used for requests",
            ));
        }
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(ErrorCode::InvalidJwt, "Malformed subject"))?;
        Ok(RequestUser::new(id, claims.sns, claims.role))
    }
}
