#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::Record;
use crate::validation::{
    Validate, ValidationError, parse_variant, require, require_http_url, require_mime_type,
    require_uuid,
};

/// Kind of entity that owns an attachment.
///
/// Stored as the table name of the owner, so a sweep can join against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum ParentTable {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "projects"))]
    Projects,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "educations"))]
    Educations,
}

impl ParentTable {
    pub const ALL: &'static [ParentTable] = &[Self::Projects, Self::Educations];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Educations => "educations",
        }
    }
}

impl fmt::Display for ParentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParentTable {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "parent_table", Self::ALL, Self::as_str)
    }
}

/// What an attachment is used for by its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "image"))]
    Image,
}

impl FileRole {
    pub const ALL: &'static [FileRole] = &[Self::Image];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "role", Self::ALL, Self::as_str)
    }
}

/// Attachment metadata. The owner is referenced by `(parent_table, parent_id)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub parent_table: ParentTable,
    pub parent_id: String,
    pub role: FileRole,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: i64,
}

pub type File = Record<FilePayload>;

impl Validate for FilePayload {
    fn validate(&self) -> Result<(), ValidationError> {
        require_uuid(&self.parent_id, "parent_id")?;
        require(&self.name, "name")?;
        require_http_url(&self.url, "url")?;
        require_mime_type(&self.mime_type, "type")?;
        if self.size <= 0 {
            return Err(ValidationError::new("size must be greater than 0"));
        }
        Ok(())
    }
}
