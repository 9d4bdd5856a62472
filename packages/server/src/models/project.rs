use std::collections::HashMap;

use catalog_common::{File, Project, ProjectFilter, ProjectPayload, ProjectType, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file::{FileResponse, PreviewRequest};
use super::shared::{Pagination, optional_filter, page_query};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProjectRequest {
    /// Preview images stored as attachments of the new project.
    #[serde(default)]
    pub previews: Vec<PreviewRequest>,
    #[serde(rename = "blurhash")]
    pub blur_hash: String,
    pub title: String,
    #[serde(rename = "sub_title")]
    pub subtitle: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    #[schema(example = "web")]
    pub project_type: String,
    pub link: String,
    pub education_id: Option<String>,
}

impl CreateProjectRequest {
    pub fn into_parts(self) -> Result<(ProjectPayload, Vec<PreviewRequest>), ValidationError> {
        let payload = ProjectPayload {
            blur_hash: self.blur_hash,
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            tags: self.tags,
            project_type: self.project_type.parse()?,
            link: self.link,
            education_id: self.education_id,
        };
        Ok((payload, self.previews))
    }
}

/// Full replacement of a project's fields. Previews are managed through
/// `/files`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateProjectRequest {
    #[serde(rename = "blurhash")]
    pub blur_hash: String,
    pub title: String,
    #[serde(rename = "sub_title")]
    pub subtitle: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub project_type: String,
    pub link: String,
    pub education_id: Option<String>,
}

impl UpdateProjectRequest {
    pub fn into_payload(self) -> Result<ProjectPayload, ValidationError> {
        Ok(ProjectPayload {
            blur_hash: self.blur_hash,
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            tags: self.tags,
            project_type: self.project_type.parse()?,
            link: self.link,
            education_id: self.education_id,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    pub id: String,
    #[serde(rename = "blurhash")]
    pub blur_hash: String,
    pub title: String,
    #[serde(rename = "sub_title")]
    pub subtitle: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_id: Option<String>,
    pub previews: Vec<FileResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
    pub fn new(project: Project, previews: Vec<FileResponse>) -> Self {
        Self {
            id: project.id,
            blur_hash: project.data.blur_hash,
            title: project.data.title,
            subtitle: project.data.subtitle,
            description: project.data.description,
            tags: project.data.tags,
            project_type: project.data.project_type,
            link: project.data.link,
            education_id: project.data.education_id,
            previews,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }

    /// Join each project with its entry from a batch preview lookup.
    pub fn join(
        projects: Vec<Project>,
        previews: &mut HashMap<String, Vec<File>>,
    ) -> Vec<Self> {
        projects
            .into_iter()
            .map(|project| {
                let files = previews.remove(&project.id).unwrap_or_default();
                Self::new(project, files.into_iter().map(FileResponse::from).collect())
            })
            .collect()
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    /// Page number, 1-based. Values below 1 are treated as 1.
    pub page: Option<i64>,
    /// Items per page, clamped to 1..=100. Default 10.
    pub page_size: Option<i64>,
    /// `created_at` (default) or `updated_at`.
    pub sort_by: Option<String>,
    /// Ascending order when true. Default descending.
    pub sort_ascending: Option<bool>,
    /// Restrict to one project type: `web`, `mobile` or `game`.
    #[serde(rename = "type")]
    pub project_type: Option<String>,
}

impl ProjectListQuery {
    pub fn into_filter(self) -> Result<ProjectFilter, ValidationError> {
        Ok(ProjectFilter {
            page: page_query(
                self.page,
                self.page_size,
                self.sort_by.as_deref(),
                self.sort_ascending,
            )?,
            project_type: optional_filter(self.project_type.as_deref())?,
        })
    }
}
