use catalog_common::ValidationError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a repository operation.
///
/// Every variant names the entity kind so the message reads as one sentence of
/// context on top of the underlying cause.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The caller's input broke a domain rule. Nothing was sent to the store.
    #[error("failed to validate {entity}: {source}")]
    Validation {
        entity: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("failed to {op} {entity}: {source}")]
    Storage {
        op: &'static str,
        entity: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("failed to encode {entity}: {source}")]
    Encoding {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A row read back from the store failed response validation.
    #[error("invalid {entity} returned: {source}")]
    Corrupt {
        entity: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl RepoError {
    pub fn validation(entity: &'static str, source: ValidationError) -> Self {
        Self::Validation { entity, source }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Adapter for `map_err` on store calls.
    pub fn storage(op: &'static str, entity: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Storage { op, entity, source }
    }

    pub fn corrupt(entity: &'static str, source: ValidationError) -> Self {
        Self::Corrupt { entity, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
