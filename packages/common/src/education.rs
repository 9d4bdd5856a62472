#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::Record;
use crate::validation::{Validate, ValidationError, parse_variant, require, require_if_present};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "elementary"))]
    Elementary,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "junior-high-school"))]
    #[serde(alias = "junior-high")]
    JuniorHighSchool,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "senior-high-school"))]
    #[serde(alias = "senior-high")]
    SeniorHighSchool,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "college"))]
    College,
}

impl EducationLevel {
    pub const ALL: &'static [EducationLevel] = &[
        Self::Elementary,
        Self::JuniorHighSchool,
        Self::SeniorHighSchool,
        Self::College,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::JuniorHighSchool => "junior-high-school",
            Self::SeniorHighSchool => "senior-high-school",
            Self::College => "college",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "junior-high" => Ok(Self::JuniorHighSchool),
            "senior-high" => Ok(Self::SeniorHighSchool),
            other => parse_variant(other, "level", Self::ALL, Self::as_str),
        }
    }
}

/// One attended school. Embedded in [`EducationPayload`], never stored alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SchoolPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, rename = "blurhash")]
    pub blur_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honor: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl SchoolPeriod {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Validate for SchoolPeriod {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.description, "description")?;
        require(&self.logo, "logo")?;
        require(&self.blur_hash, "blur hash")?;
        require_if_present(self.link.as_deref(), "link")?;
        require_if_present(self.honor.as_deref(), "honor")?;

        let start = self
            .start_date
            .ok_or_else(|| ValidationError::missing("start date"))?;
        let end = self
            .end_date
            .ok_or_else(|| ValidationError::missing("end date"))?;
        if end <= start {
            return Err(ValidationError::new("end date must be after start date"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationPayload {
    pub main_school: SchoolPeriod,
    #[serde(default)]
    pub school_periods: Vec<SchoolPeriod>,
    pub level: EducationLevel,
}

pub type Education = Record<EducationPayload>;

impl Validate for EducationPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.main_school.is_empty() {
            return Err(ValidationError::missing("main school"));
        }
        self.main_school
            .validate()
            .map_err(|e| e.within("main school"))?;

        for (i, period) in self.school_periods.iter().enumerate() {
            let container = format!("school period[{i}]");
            if period.is_empty() {
                return Err(ValidationError::new("is empty").within(container));
            }
            period.validate().map_err(|e| e.within(container))?;
        }
        Ok(())
    }
}
