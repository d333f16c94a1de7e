//! Lector sign-up request/response shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::embedded::{Career, Careers, Certificate, Certificates, Contest, Contests};
use crate::entity::{lector, lector_approved_file};
use crate::error::{AppError, AppResult};
use crate::models::user::UserProfileDto;
use crate::models::validation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LectorContestDto {
    pub year: i32,
    pub title: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LectorCertificateDto {
    pub acquisition_date: NaiveDate,
    pub rate: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LectorCareerDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LectorRequest {
    pub profile: UserProfileDto,
    pub is_setter: bool,
    #[serde(default)]
    pub contest_list: Vec<LectorContestDto>,
    #[serde(default)]
    pub certificate_list: Vec<LectorCertificateDto>,
    #[serde(default)]
    pub career_list: Vec<LectorCareerDto>,
    #[serde(default)]
    pub proof_list: Vec<String>,
}

impl LectorRequest {
    pub fn validate(&self) -> AppResult<()> {
        self.profile.validate()?;
        for contest in &self.contest_list {
            validation::not_blank("contest title", &contest.title)?;
            validation::not_blank("contest name", &contest.name)?;
        }
        for certificate in &self.certificate_list {
            validation::not_blank("certificate name", &certificate.name)?;
            validation::non_negative("certificate rate", certificate.rate)?;
        }
        for career in &self.career_list {
            validation::not_blank("career name", &career.name)?;
            if career.start_date > career.end_date {
                return Err(AppError::invalid_format(format!(
                    "career {} ends before it starts",
                    career.name
                )));
            }
        }
        if self.proof_list.is_empty() {
            return Err(AppError::invalid_format("at least one proof file is required"));
        }
        Ok(())
    }

    pub fn to_lector(&self, user_id: Uuid, now: DateTime<Utc>) -> lector::Model {
        lector::Model {
            id: Uuid::now_v7(),
            user_id,
            is_setter: self.is_setter,
            contest: Contests(
                self.contest_list
                    .iter()
                    .map(|c| Contest {
                        year: c.year,
                        title: c.title.clone(),
                        name: c.name.clone(),
                    })
                    .collect(),
            ),
            certificate: Certificates(
                self.certificate_list
                    .iter()
                    .map(|c| Certificate {
                        acquisition_date: c.acquisition_date,
                        rate: c.rate,
                        name: c.name.clone(),
                    })
                    .collect(),
            ),
            career: Careers(
                self.career_list
                    .iter()
                    .map(|c| Career {
                        start_date: c.start_date,
                        end_date: c.end_date,
                        name: c.name.clone(),
                    })
                    .collect(),
            ),
            approved: false,
            rejected: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_approved_files(
        &self,
        lector_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<lector_approved_file::Model> {
        self.proof_list
            .iter()
            .map(|url| lector_approved_file::Model {
                id: Uuid::now_v7(),
                lector_id,
                user_id,
                url: url.clone(),
                created_at: now,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LectorResponse {
    pub lector_id: Uuid,
    pub is_setter: bool,
    pub contest_list: Vec<LectorContestDto>,
    pub certificate_list: Vec<LectorCertificateDto>,
    pub career_list: Vec<LectorCareerDto>,
    pub proof_list: Vec<String>,
    pub approved: bool,
}

impl LectorResponse {
    pub fn from_entity(lector: &lector::Model, files: &[lector_approved_file::Model]) -> Self {
        Self {
            lector_id: lector.id,
            is_setter: lector.is_setter,
            contest_list: lector
                .contest
                .0
                .iter()
                .map(|c| LectorContestDto {
                    year: c.year,
                    title: c.title.clone(),
                    name: c.name.clone(),
                })
                .collect(),
            certificate_list: lector
                .certificate
                .0
                .iter()
                .map(|c| LectorCertificateDto {
                    acquisition_date: c.acquisition_date,
                    rate: c.rate,
                    name: c.name.clone(),
                })
                .collect(),
            career_list: lector
                .career
                .0
                .iter()
                .map(|c| LectorCareerDto {
                    start_date: c.start_date,
                    end_date: c.end_date,
                    name: c.name.clone(),
                })
                .collect(),
            proof_list: files.iter().map(|f| f.url.clone()).collect(),
            approved: lector.approved,
        }
    }
}

/// Row in the admin lector review queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LectorBriefResponse {
    pub lector_id: Uuid,
    pub user_id: Uuid,
    pub is_setter: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl LectorBriefResponse {
    pub fn from_entity(lector: lector::Model) -> Self {
        Self {
            lector_id: lector.id,
            user_id: lector.user_id,
            is_setter: lector.is_setter,
            is_approved: lector.approved,
            created_at: lector.created_at,
        }
    }
}
