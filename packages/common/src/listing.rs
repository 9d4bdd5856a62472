use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::project::ProjectType;
use crate::skill::SkillCategory;
use crate::validation::{ValidationError, parse_variant};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Sortable columns. Anything else is rejected before a query is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    pub const ALL: &'static [SortBy] = &[Self::CreatedAt, Self::UpdatedAt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "sort_by", Self::ALL, Self::as_str)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const ALL: &'static [SortDirection] = &[Self::Asc, Self::Desc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_ascending(ascending: bool) -> Self {
        if ascending { Self::Asc } else { Self::Desc }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "direction", Self::ALL, Self::as_str)
    }
}

/// Normalised paging and ordering.
///
/// Out-of-range input is clamped rather than rejected: a page below 1 becomes
/// 1, a page size below 1 becomes [`DEFAULT_PAGE_SIZE`], and a page size above
/// [`MAX_PAGE_SIZE`] becomes [`MAX_PAGE_SIZE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u64,
    pub page_size: u64,
    pub sort_by: SortBy,
    pub direction: SortDirection,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortBy::default(),
            direction: SortDirection::default(),
        }
    }
}

impl PageQuery {
    pub fn new(
        page: Option<i64>,
        page_size: Option<i64>,
        sort_by: Option<SortBy>,
        direction: Option<SortDirection>,
    ) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p as u64,
            _ => 1,
        };
        let page_size = match page_size {
            Some(s) if s < 1 => DEFAULT_PAGE_SIZE,
            Some(s) => (s as u64).min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };
        Self {
            page,
            page_size,
            sort_by: sort_by.unwrap_or_default(),
            direction: direction.unwrap_or_default(),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub page: PageQuery,
    pub project_type: Option<ProjectType>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkillFilter {
    pub page: PageQuery,
    pub category: Option<SkillCategory>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EducationFilter {
    pub page: PageQuery,
}
