//! Storage access for catalog entities.
//!
//! Repositories borrow any [`ConnectionTrait`] implementor, so the same code
//! runs against the pool or inside a transaction opened by the caller.

pub mod education;
pub mod error;
pub mod file;
pub mod project;
pub mod skill;

use catalog_common::{SortDirection, ValidationError};
use sea_orm::Order;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub use education::EducationRepository;
pub use error::RepoError;
pub use file::FileRepository;
pub use project::ProjectRepository;
pub use skill::SkillRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Time-ordered identifier rendered in canonical 36-character form.
pub(crate) fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub(crate) fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// Fails with a validation error when `id` is blank.
pub(crate) fn require_id(id: &str, entity: &'static str) -> RepoResult<()> {
    if id.trim().is_empty() {
        return Err(RepoError::validation(entity, ValidationError::missing("id")));
    }
    Ok(())
}

pub(crate) fn encode_json<T: Serialize>(value: &T, entity: &'static str) -> RepoResult<String> {
    serde_json::to_string(value).map_err(|source| RepoError::Encoding { entity, source })
}

pub(crate) fn decode_json<T: DeserializeOwned>(
    raw: &str,
    field: &str,
    entity: &'static str,
) -> RepoResult<T> {
    serde_json::from_str(raw).map_err(|e| {
        RepoError::corrupt(entity, ValidationError::new(format!("{field} undecodable: {e}")))
    })
}
