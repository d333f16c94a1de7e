//! Upload purposes and the upload response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a center-side upload is for. Determines the storage folder and accepted types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CenterUploadPurpose {
    Profile,
    Image,
    Fee,
    Proof,
}

impl CenterUploadPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Image => "image",
            Self::Fee => "fee",
            Self::Proof => "proof",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "profile" => Some(Self::Profile),
            "image" => Some(Self::Image),
            "fee" => Some(Self::Fee),
            "proof" => Some(Self::Proof),
            _ => None,
        }
    }

    pub fn accepts_documents(&self) -> bool {
        matches!(self, Self::Proof)
    }
}

/// What a lector-side upload is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LectorUploadPurpose {
    Proof,
}

impl LectorUploadPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proof => "proof",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "proof" => Some(Self::Proof),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadFileResponse {
    pub file_url: String,
}

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub data: Vec<u8>,
}
