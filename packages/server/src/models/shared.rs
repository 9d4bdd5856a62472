use catalog_common::{PageQuery, SortBy, SortDirection, ValidationError};
use serde::Serialize;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 10)]
    pub page_size: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 5)]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: &PageQuery, total: u64) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total,
            total_pages: total.div_ceil(page.page_size),
        }
    }
}

/// Identifier of a newly created resource.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IdResponse {
    #[schema(example = "0191f6a0-7c5e-7a3b-8f00-000000000001")]
    pub id: String,
}

/// Build a normalised page from raw query parameters.
///
/// A blank `sort_by` means the default column; anything outside the allow-list
/// is rejected.
pub fn page_query(
    page: Option<i64>,
    page_size: Option<i64>,
    sort_by: Option<&str>,
    sort_ascending: Option<bool>,
) -> Result<PageQuery, ValidationError> {
    let sort_by = match sort_by.map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<SortBy>()?),
    };
    let direction = sort_ascending.map(SortDirection::from_ascending);
    Ok(PageQuery::new(page, page_size, sort_by, direction))
}

/// Parse an optional enum filter where a blank value means "no filter".
pub fn optional_filter<T>(raw: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
