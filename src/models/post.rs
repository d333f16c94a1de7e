//! Post listing and summary shapes for a center's dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{climbing_history, post};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClimbingHistoryDto {
    pub hold_id: Uuid,
    pub climbing_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostBriefResponse {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    /// First image of the post, used as its thumbnail
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub climbing_history: Vec<ClimbingHistoryDto>,
}

impl PostBriefResponse {
    pub fn from_entity(post: post::Model, histories: &[climbing_history::Model]) -> Self {
        Self {
            post_id: post.id,
            user_id: post.user_id,
            content: post.content,
            image: post.img.0.into_iter().next(),
            created_at: post.created_at,
            climbing_history: histories
                .iter()
                .filter(|h| h.post_id == post.id)
                .map(|h| ClimbingHistoryDto {
                    hold_id: h.hold_id,
                    climbing_count: h.climbing_count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostCountPerHold {
    pub hold_id: Uuid,
    pub hold_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostSummaryResponse {
    pub center_id: Uuid,
    pub center_name: String,
    pub count_total: u64,
    pub count_today: u64,
    pub count_per_week: u64,
    pub count_per_month: u64,
    pub count_per_hold: Vec<PostCountPerHold>,
}
