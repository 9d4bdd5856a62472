#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::blurhash;
use crate::record::Record;
use crate::validation::{
    Validate, ValidationError, parse_variant, require, require_if_present, require_uuid,
};

/// Kind of portfolio project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "web"))]
    Web,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "mobile"))]
    Mobile,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "game"))]
    Game,
}

impl ProjectType {
    pub const ALL: &'static [ProjectType] = &[Self::Web, Self::Mobile, Self::Game];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Game => "game",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "type", Self::ALL, Self::as_str)
    }
}

/// Caller-supplied project fields.
///
/// Preview images are not stored here; they live in the attachment store as
/// files with `parent_table = projects` and `role = image`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_id: Option<String>,
}

pub type Project = Record<ProjectPayload>;

impl Validate for ProjectPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.blur_hash, "blur hash")?;
        if !blurhash::is_valid(&self.blur_hash) {
            return Err(ValidationError::invalid("blur hash"));
        }
        require(&self.title, "title")?;
        require(&self.subtitle, "subtitle")?;
        require(&self.description, "description")?;

        if self.tags.is_empty() {
            return Err(ValidationError::missing("tags"));
        }
        for (i, tag) in self.tags.iter().enumerate() {
            if tag.trim().is_empty() {
                return Err(ValidationError::new(format!("tag[{i}] is empty")));
            }
        }

        require(&self.link, "link")?;

        require_if_present(self.education_id.as_deref(), "education id")?;
        if let Some(ref education_id) = self.education_id {
            require_uuid(education_id, "education id")?;
        }
        Ok(())
    }
}
