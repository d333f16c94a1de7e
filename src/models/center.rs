//! Center request/response shapes and their mapping to and from entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::embedded::{
    CenterFeeImage, CenterFeeImages, CenterImage, CenterImages, OperatingTime, OperatingTimes,
    Utilities, Utility,
};
use crate::entity::{center, center_approved_file, center_fee, center_hold, center_wall};
use crate::error::{AppError, AppResult};
use crate::models::user::UserProfileDto;
use crate::models::validation;

/// Prefix turning a stored channel URL into the client-facing channel code.
pub const YOUTUBE_URL_PREFIX: &str = "https://www.youtube.com/";

pub fn youtube_url_from_code(code: &str) -> String {
    format!("{}{}", YOUTUBE_URL_PREFIX, code)
}

pub fn youtube_code_from_url(url: &str) -> String {
    url.strip_prefix(YOUTUBE_URL_PREFIX).unwrap_or(url).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WallType {
    Endurance,
    Bouldering,
}

impl WallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Endurance => "ENDURANCE",
            Self::Bouldering => "BOULDERING",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ENDURANCE" => Some(Self::Endurance),
            "BOULDERING" => Some(Self::Bouldering),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterOperatingTimeDto {
    /// Day label as entered by the center, e.g. "월"
    pub day_of_week: String,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterFeeDto {
    pub name: String,
    pub price: i32,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterHoldDto {
    pub name: String,
    pub difficulty: String,
    pub is_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterWallDto {
    pub name: String,
    pub wall_type: WallType,
}

/// Center sign-up request: the admin's profile plus the full center graph.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CenterAuthRequest {
    pub profile: UserProfileDto,
    pub profile_image: String,
    pub name: String,
    pub address: String,
    pub detail_address: Option<String>,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_name: Option<String>,
    pub youtube_code: Option<String>,
    #[serde(default)]
    pub image_list: Vec<String>,
    #[serde(default)]
    pub utility_list: Vec<String>,
    #[serde(default)]
    pub fee_image_list: Vec<String>,
    #[serde(default)]
    pub operating_time_list: Vec<CenterOperatingTimeDto>,
    #[serde(default)]
    pub fee_list: Vec<CenterFeeDto>,
    #[serde(default)]
    pub hold_list: Vec<CenterHoldDto>,
    #[serde(default)]
    pub wall_list: Vec<CenterWallDto>,
    #[serde(default)]
    pub proof_list: Vec<String>,
}

impl CenterAuthRequest {
    pub fn validate(&self) -> AppResult<()> {
        self.profile.validate()?;
        validation::not_blank("name", &self.name)?;
        validation::not_blank("address", &self.address)?;
        validation::not_blank("profile_image", &self.profile_image)?;

        for time in &self.operating_time_list {
            validation::not_blank("day_of_week", &time.day_of_week)?;
            let start = validation::clock_time(&time.start_time)?;
            let end = validation::clock_time(&time.end_time)?;
            if start > end {
                return Err(AppError::invalid_format(format!(
                    "operating time {} starts after it ends",
                    time.day_of_week
                )));
            }
        }
        for fee in &self.fee_list {
            validation::not_blank("fee name", &fee.name)?;
            validation::non_negative("fee price", fee.price)?;
            validation::non_negative("fee count", fee.count)?;
        }
        for hold in &self.hold_list {
            validation::not_blank("hold name", &hold.name)?;
            validation::not_blank("hold difficulty", &hold.difficulty)?;
        }
        for wall in &self.wall_list {
            validation::not_blank("wall name", &wall.name)?;
        }
        if self.proof_list.is_empty() {
            return Err(AppError::invalid_format("at least one proof file is required"));
        }
        Ok(())
    }

    /// Build the center row owned by `user_id`.
    pub fn to_center(&self, user_id: Uuid, now: DateTime<Utc>) -> center::Model {
        center::Model {
            id: Uuid::now_v7(),
            user_id,
            name: self.name.clone(),
            profile_img: self.profile_image.clone(),
            address: self.address.clone(),
            detail_address: self.detail_address.clone(),
            tel: self.tel.clone(),
            web_url: self.web_url.clone(),
            instagram_name: self.instagram_name.clone(),
            youtube_url: self.youtube_code.as_deref().map(youtube_url_from_code),
            center_img: CenterImages(
                self.image_list
                    .iter()
                    .map(|url| CenterImage { url: url.clone() })
                    .collect(),
            ),
            operating_time: OperatingTimes(
                self.operating_time_list
                    .iter()
                    .map(|t| OperatingTime {
                        day_of_week: t.day_of_week.clone(),
                        start_time: t.start_time.clone(),
                        end_time: t.end_time.clone(),
                    })
                    .collect(),
            ),
            utility: Utilities(
                self.utility_list
                    .iter()
                    .map(|name| Utility { name: name.clone() })
                    .collect(),
            ),
            fee_img: CenterFeeImages(
                self.fee_image_list
                    .iter()
                    .map(|url| CenterFeeImage { url: url.clone() })
                    .collect(),
            ),
            approved: false,
            rejected: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_fees(&self, center_id: Uuid) -> Vec<center_fee::Model> {
        self.fee_list
            .iter()
            .map(|fee| center_fee::Model {
                id: Uuid::now_v7(),
                center_id,
                name: fee.name.clone(),
                price: fee.price,
                count: fee.count,
            })
            .collect()
    }

    pub fn to_holds(&self, center_id: Uuid) -> Vec<center_hold::Model> {
        self.hold_list
            .iter()
            .map(|hold| center_hold::Model {
                id: Uuid::now_v7(),
                center_id,
                name: hold.name.clone(),
                difficulty: hold.difficulty.clone(),
                is_color: hold.is_color,
            })
            .collect()
    }

    pub fn to_walls(&self, center_id: Uuid) -> Vec<center_wall::Model> {
        self.wall_list
            .iter()
            .map(|wall| center_wall::Model {
                id: Uuid::now_v7(),
                center_id,
                name: wall.name.clone(),
                wall_type: wall.wall_type.as_str().to_string(),
            })
            .collect()
    }

    pub fn to_approved_files(
        &self,
        center_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<center_approved_file::Model> {
        self.proof_list
            .iter()
            .map(|url| center_approved_file::Model {
                id: Uuid::now_v7(),
                center_id,
                user_id,
                url: url.clone(),
                created_at: now,
            })
            .collect()
    }
}

/// Full center detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterResponse {
    pub center_id: Uuid,
    pub profile_image: String,
    pub name: String,
    pub address: String,
    pub detail_address: Option<String>,
    pub tel: Option<String>,
    pub web_url: Option<String>,
    pub instagram_name: Option<String>,
    pub youtube_code: Option<String>,
    pub image_list: Vec<String>,
    pub utility_list: Vec<String>,
    pub fee_image_list: Vec<String>,
    pub operating_time_list: Vec<CenterOperatingTimeDto>,
    pub fee_list: Vec<CenterFeeDto>,
    pub hold_list: Vec<CenterHoldDto>,
    pub wall_list: Vec<CenterWallDto>,
    pub approved: bool,
}

impl CenterResponse {
    pub fn from_entity(
        center: &center::Model,
        fees: &[center_fee::Model],
        holds: &[center_hold::Model],
        walls: &[center_wall::Model],
    ) -> Self {
        Self {
            center_id: center.id,
            profile_image: center.profile_img.clone(),
            name: center.name.clone(),
            address: center.address.clone(),
            detail_address: center.detail_address.clone(),
            tel: center.tel.clone(),
            web_url: center.web_url.clone(),
            instagram_name: center.instagram_name.clone(),
            youtube_code: center.youtube_url.as_deref().map(youtube_code_from_url),
            image_list: center.center_img.0.iter().map(|i| i.url.clone()).collect(),
            utility_list: center.utility.0.iter().map(|u| u.name.clone()).collect(),
            fee_image_list: center.fee_img.0.iter().map(|i| i.url.clone()).collect(),
            operating_time_list: center
                .operating_time
                .0
                .iter()
                .map(|t| CenterOperatingTimeDto {
                    day_of_week: t.day_of_week.clone(),
                    start_time: t.start_time.clone(),
                    end_time: t.end_time.clone(),
                })
                .collect(),
            fee_list: fees
                .iter()
                .map(|f| CenterFeeDto {
                    name: f.name.clone(),
                    price: f.price,
                    count: f.count,
                })
                .collect(),
            hold_list: holds
                .iter()
                .map(|h| CenterHoldDto {
                    name: h.name.clone(),
                    difficulty: h.difficulty.clone(),
                    is_color: h.is_color,
                })
                .collect(),
            wall_list: walls
                .iter()
                .filter_map(|w| {
                    let wall_type = WallType::parse(&w.wall_type).or_else(|| {
                        tracing::warn!(wall_id = %w.id, wall_type = %w.wall_type, "Unknown wall type");
                        None
                    })?;
                    Some(CenterWallDto {
                        name: w.name.clone(),
                        wall_type,
                    })
                })
                .collect(),
            approved: center.approved,
        }
    }
}

/// Summary row used by listings and the admin review queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterBriefResponse {
    pub center_id: Uuid,
    pub profile_image: String,
    pub name: String,
    pub address: String,
    pub detail_address: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl CenterBriefResponse {
    pub fn from_entity(center: center::Model) -> Self {
        Self {
            center_id: center.id,
            profile_image: center.profile_img,
            name: center.name,
            address: center.address,
            detail_address: center.detail_address,
            is_approved: center.approved,
            created_at: center.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterNameResponse {
    pub center_id: Uuid,
    pub name: String,
    pub address: String,
}

impl CenterNameResponse {
    pub fn from_entity(center: center::Model) -> Self {
        Self {
            center_id: center.id,
            name: center.name,
            address: center.address,
        }
    }
}
