//! OAuth user-info providers.
//!
//! The client sends a provider-issued access token; each provider exchanges it for the
//! account's identity and normalizes it into [`OAuthUserInfo`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::OAuthSettings;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{OAuthProvider, OAuthUserInfo};

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Exchanges a provider token for a normalized identity.
#[async_trait]
pub trait OAuthUserInfoProvider: Send + Sync {
    async fn get_user_info(&self, token: &str) -> AppResult<OAuthUserInfo>;
}

fn wrong_token(provider: OAuthProvider) -> AppError {
    AppError::unauthorized(
        ErrorCode::WrongOauthToken,
        format!("{} rejected the sign-in token", provider),
    )
}

fn build_http_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client for OAuth: {}", e)))
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: &str,
    provider: OAuthProvider,
) -> AppResult<T> {
    let response = client
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| {
            warn!(provider = %provider, "OAuth: failed to fetch user info: {}", e);
            wrong_token(provider)
        })?;

    if !response.status().is_success() {
        warn!(provider = %provider, status = %response.status(), "OAuth: user info rejected");
        return Err(wrong_token(provider));
    }

    response.json::<T>().await.map_err(|e| {
        warn!(provider = %provider, "OAuth: failed to parse user info: {}", e);
        wrong_token(provider)
    })
}

#[derive(Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

pub struct GoogleUserInfoProvider {
    client: reqwest::Client,
    userinfo_url: String,
}

impl GoogleUserInfoProvider {
    pub fn new(userinfo_url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client: build_http_client()?,
            userinfo_url: userinfo_url.into(),
        })
    }
}

#[async_trait]
impl OAuthUserInfoProvider for GoogleUserInfoProvider {
    async fn get_user_info(&self, token: &str) -> AppResult<OAuthUserInfo> {
        let info: GoogleUserInfo =
            fetch_json(&self.client, &self.userinfo_url, token, OAuthProvider::Google).await?;

        Ok(OAuthUserInfo {
            sns: info.email.clone().unwrap_or_else(|| format!("google:{}", info.sub)),
            oauth_id: info.sub,
            email: info.email,
            nickname: info.name,
            profile_image: info.picture,
        })
    }
}

#[derive(Deserialize)]
struct KakaoUserInfo {
    id: i64,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    profile: Option<KakaoProfile>,
}

#[derive(Deserialize)]
struct KakaoProfile {
    nickname: Option<String>,
    profile_image_url: Option<String>,
}

pub struct KakaoUserInfoProvider {
    client: reqwest::Client,
    userinfo_url: String,
}

impl KakaoUserInfoProvider {
    pub fn new(userinfo_url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client: build_http_client()?,
            userinfo_url: userinfo_url.into(),
        })
    }
}

#[async_trait]
impl OAuthUserInfoProvider for KakaoUserInfoProvider {
    async fn get_user_info(&self, token: &str) -> AppResult<OAuthUserInfo> {
        let info: KakaoUserInfo =
            fetch_json(&self.client, &self.userinfo_url, token, OAuthProvider::Kakao).await?;

        let account = info.kakao_account;
        let email = account.as_ref().and_then(|a| a.email.clone());
        let profile = account.and_then(|a| a.profile);

        Ok(OAuthUserInfo {
            oauth_id: info.id.to_string(),
            sns: email.clone().unwrap_or_else(|| format!("kakao:{}", info.id)),
            email,
            nickname: profile.as_ref().and_then(|p| p.nickname.clone()),
            profile_image: profile.and_then(|p| p.profile_image_url),
        })
    }
}

/// Looks up the provider implementation for a provider tag.
#[derive(Clone, Default)]
pub struct OAuthUserInfoProviderSupplier {
    providers: HashMap<OAuthProvider, Arc<dyn OAuthUserInfoProvider>>,
}

impl OAuthUserInfoProviderSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Google and Kakao providers against the configured endpoints.
    pub fn from_settings(settings: &OAuthSettings) -> AppResult<Self> {
        Ok(Self::new()
            .with_provider(
                OAuthProvider::Google,
                Arc::new(GoogleUserInfoProvider::new(&settings.google_userinfo_url)?),
            )
            .with_provider(
                OAuthProvider::Kakao,
                Arc::new(KakaoUserInfoProvider::new(&settings.kakao_userinfo_url)?),
            ))
    }

    pub fn with_provider(
        mut self,
        provider: OAuthProvider,
        implementation: Arc<dyn OAuthUserInfoProvider>,
    ) -> Self {
        self.providers.insert(provider, implementation);
        self
    }

    pub fn get_provider(&self, provider: OAuthProvider) -> AppResult<Arc<dyn OAuthUserInfoProvider>> {
        self.providers.get(&provider).cloned().ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::InvalidFormat,
                format!("OAuth provider {} is not configured", provider),
            )
        })
    }
}
