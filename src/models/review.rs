//! Review listing, summary and answer shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{review, review_answer, review_tag};
use crate::error::AppResult;
use crate::models::validation;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewAnswerRequest {
    pub answer_content: String,
}

impl ReviewAnswerRequest {
    pub fn validate(&self) -> AppResult<()> {
        validation::not_blank("answer_content", &self.answer_content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewAnswerResponse {
    pub review_answer_id: Uuid,
    pub answer_content: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewAnswerResponse {
    pub fn from_entity(answer: review_answer::Model) -> Self {
        Self {
            review_answer_id: answer.id,
            answer_content: answer.content,
            created_at: answer.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewBriefResponse {
    pub review_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub answer: Option<ReviewAnswerResponse>,
}

impl ReviewBriefResponse {
    /// `tags` and `answers` may cover several reviews; only this review's rows are used.
    pub fn from_entity(
        review: review::Model,
        tags: &[review_tag::Model],
        answers: &[review_answer::Model],
    ) -> Self {
        Self {
            review_id: review.id,
            user_id: review.user_id,
            content: review.content,
            created_at: review.created_at,
            tags: tags
                .iter()
                .filter(|t| t.review_id == review.id)
                .map(|t| t.word.clone())
                .collect(),
            answer: answers
                .iter()
                .find(|a| a.review_id == review.id)
                .cloned()
                .map(ReviewAnswerResponse::from_entity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewTagCount {
    pub tag: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewSummaryResponse {
    pub center_id: Uuid,
    pub center_name: String,
    pub count_total: u64,
    pub count_answered: u64,
    pub count_not_answered: u64,
    /// Most used tags first
    pub count_per_tag: Vec<ReviewTagCount>,
}
