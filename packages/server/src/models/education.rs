use catalog_common::{
    Education, EducationFilter, EducationLevel, EducationPayload, SchoolPeriod, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::project::ProjectResponse;
use super::shared::{Pagination, page_query};

/// Education fields sent for create and full update.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct EducationRequest {
    #[serde(default)]
    pub main_school: SchoolPeriod,
    #[serde(default)]
    pub school_periods: Vec<SchoolPeriod>,
    #[schema(example = "college")]
    #[serde(default)]
    pub level: String,
}

impl EducationRequest {
    pub fn into_payload(self) -> Result<EducationPayload, ValidationError> {
        Ok(EducationPayload {
            main_school: self.main_school,
            school_periods: self.school_periods,
            level: self.level.parse()?,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EducationResponse {
    pub id: String,
    pub main_school: SchoolPeriod,
    pub school_periods: Vec<SchoolPeriod>,
    pub level: EducationLevel,
    /// Projects whose `education_id` points at this education.
    pub projects: Vec<ProjectResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EducationResponse {
    pub fn new(education: Education, projects: Vec<ProjectResponse>) -> Self {
        Self {
            id: education.id,
            main_school: education.data.main_school,
            school_periods: education.data.school_periods,
            level: education.data.level,
            projects,
            created_at: education.created_at,
            updated_at: education.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EducationListResponse {
    pub data: Vec<EducationResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EducationListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_ascending: Option<bool>,
}

impl EducationListQuery {
    pub fn into_filter(self) -> Result<EducationFilter, ValidationError> {
        Ok(EducationFilter {
            page: page_query(
                self.page,
                self.page_size,
                self.sort_by.as_deref(),
                self.sort_ascending,
            )?,
        })
    }
}
