#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::record::Record;
use crate::validation::{Validate, ValidationError, parse_variant, require};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "frontend"))]
    Frontend,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "backend"))]
    Backend,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "tools"))]
    Tools,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "others"))]
    Others,
}

impl SkillCategory {
    pub const ALL: &'static [SkillCategory] =
        &[Self::Frontend, Self::Backend, Self::Tools, Self::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Tools => "tools",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "category", Self::ALL, Self::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPayload {
    pub icon: String,
    pub hex_color: String,
    pub label: String,
    pub category: SkillCategory,
}

pub type Skill = Record<SkillPayload>;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{3}([0-9A-Fa-f]{3})?$").expect("hex color pattern compiles")
});

/// `#RGB` or `#RRGGBB`, hex digits in either case.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

impl Validate for SkillPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.icon, "icon")?;
        require(&self.hex_color, "hex color")?;
        if !is_hex_color(&self.hex_color) {
            return Err(ValidationError::new(
                "hex color must be in format #RGB or #RRGGBB",
            ));
        }
        require(&self.label, "label")?;
        Ok(())
    }
}
