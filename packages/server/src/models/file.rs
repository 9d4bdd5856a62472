use chrono::{DateTime, Utc};
use catalog_common::validation::{require, require_http_url, require_mime_type};
use catalog_common::{File, FilePayload, FileRole, ParentTable, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Attachment metadata sent by the client for create and full update.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FileRequest {
    #[schema(example = "projects")]
    pub parent_table: String,
    pub parent_id: String,
    #[schema(example = "image")]
    pub role: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    #[schema(example = "image/png")]
    pub mime_type: String,
    pub size: i64,
}

impl FileRequest {
    pub fn into_payload(self) -> Result<FilePayload, ValidationError> {
        Ok(FilePayload {
            parent_table: self.parent_table.parse()?,
            parent_id: self.parent_id,
            role: self.role.parse()?,
            name: self.name,
            url: self.url,
            mime_type: self.mime_type,
            size: self.size,
        })
    }
}

/// A preview image attached while creating a project.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PreviewRequest {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: i64,
}

impl PreviewRequest {
    pub fn into_payload(self, project_id: &str) -> FilePayload {
        FilePayload {
            parent_table: ParentTable::Projects,
            parent_id: project_id.to_owned(),
            role: FileRole::Image,
            name: self.name,
            url: self.url,
            mime_type: self.mime_type,
            size: self.size,
        }
    }
}

/// Same rules as an attachment, minus the owner which does not exist yet.
impl Validate for PreviewRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require_http_url(&self.url, "url")?;
        require_mime_type(&self.mime_type, "type")?;
        if self.size <= 0 {
            return Err(ValidationError::new("size must be greater than 0"));
        }
        Ok(())
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FileResponse {
    pub id: String,
    pub parent_table: ParentTable,
    pub parent_id: String,
    pub role: FileRole,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            parent_table: file.data.parent_table,
            parent_id: file.data.parent_id,
            role: file.data.role,
            name: file.data.name,
            url: file.data.url,
            mime_type: file.data.mime_type,
            size: file.data.size,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

/// Selects the attachments of one owner.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileParentQuery {
    /// Owner kind: `projects` or `educations`.
    pub parent_table: Option<String>,
    /// Owner identifier.
    pub parent_id: Option<String>,
    /// Attachment role. Required when listing.
    pub role: Option<String>,
}

impl FileParentQuery {
    pub fn parent_table(&self) -> Result<ParentTable, ValidationError> {
        self.parent_table.as_deref().unwrap_or_default().parse()
    }

    pub fn parent_id(&self) -> Result<&str, ValidationError> {
        match self.parent_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ValidationError::missing("parent_id")),
        }
    }

    pub fn role(&self) -> Result<FileRole, ValidationError> {
        self.role.as_deref().unwrap_or_default().parse()
    }
}

/// Number of attachments removed by a bulk delete.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    pub deleted: u64,
}
