use catalog_common::{Skill, SkillCategory, SkillFilter, SkillPayload, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{Pagination, optional_filter, page_query};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SkillRequest {
    pub icon: String,
    #[schema(example = "#f74c00")]
    pub hex_color: String,
    pub label: String,
    #[schema(example = "backend")]
    pub category: String,
}

impl SkillRequest {
    pub fn into_payload(self) -> Result<SkillPayload, ValidationError> {
        Ok(SkillPayload {
            icon: self.icon,
            hex_color: self.hex_color,
            label: self.label,
            category: self.category.parse()?,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SkillResponse {
    pub id: String,
    pub icon: String,
    pub hex_color: String,
    pub label: String,
    pub category: SkillCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            icon: skill.data.icon,
            hex_color: skill.data.hex_color,
            label: skill.data.label,
            category: skill.data.category,
            created_at: skill.created_at,
            updated_at: skill.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SkillListResponse {
    pub data: Vec<SkillResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SkillListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_ascending: Option<bool>,
    /// `frontend`, `backend`, `tools` or `others`.
    pub category: Option<String>,
}

impl SkillListQuery {
    pub fn into_filter(self) -> Result<SkillFilter, ValidationError> {
        Ok(SkillFilter {
            page: page_query(
                self.page,
                self.page_size,
                self.sort_by.as_deref(),
                self.sort_ascending,
            )?,
            category: optional_filter(self.category.as_deref())?,
        })
    }
}
