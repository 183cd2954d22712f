//! Catalog documents and the rows they are built from.
//!
//! Documents serialize with the field names the browser client expects
//! (`_id`, `basicInfo`, `projectName`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ProjectStatus::Pending),
            "approved" => Some(ProjectStatus::Approved),
            "rejected" => Some(ProjectStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub project_name: String,
    pub country: String,
    pub target_amount: i64,
    pub campaign_duration: i64,
    pub category: String,
    pub status: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub basic_info: BasicInfo,
}

impl ProjectDocument {
    pub fn from_row(row: ProjectRow, photos: Vec<PhotoRef>) -> Result<Self> {
        let status = ProjectStatus::parse(&row.status).ok_or_else(|| {
            ApiError::Corrupt(format!("project {} has unknown status '{}'", row.id, row.status))
        })?;
        let created_at = DateTime::from_timestamp(row.created_at, 0).ok_or_else(|| {
            ApiError::Corrupt(format!(
                "project {} has out-of-range created_at {}",
                row.id, row.created_at
            ))
        })?;

        Ok(Self {
            id: row.id,
            status,
            created_at,
            basic_info: BasicInfo {
                project_name: row.project_name,
                country: row.country,
                target_amount: row.target_amount,
                campaign_duration: row.campaign_duration,
                category: row.category,
                project_images: photos,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub project_name: String,
    pub country: String,
    pub target_amount: i64,
    /// Campaign length in days.
    pub campaign_duration: i64,
    pub category: String,
    pub project_images: Vec<PhotoRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoRef {
    #[serde(rename = "_id")]
    pub id: i64,
}

/// Body of `POST /api/projects`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub basic_info: NewBasicInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBasicInfo {
    pub project_name: String,
    pub country: String,
    pub target_amount: i64,
    pub campaign_duration: i64,
    pub category: String,
}

impl NewBasicInfo {
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("projectName is required".to_string()));
        }
        if self.country.trim().is_empty() {
            return Err(ApiError::InvalidRequest("country is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(ApiError::InvalidRequest("category is required".to_string()));
        }
        if self.target_amount <= 0 {
            return Err(ApiError::InvalidRequest(
                "targetAmount must be positive".to_string(),
            ));
        }
        if self.campaign_duration <= 0 {
            return Err(ApiError::InvalidRequest(
                "campaignDuration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub category_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Photo {
    pub content_type: String,
    pub data: Vec<u8>,
}
