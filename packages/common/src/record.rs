use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationError, require_uuid};

/// A stored entity: the caller-supplied payload plus the fields the store owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: Validate> Record<T> {
    /// Response validation, applied to every row read back from storage.
    ///
    /// A superset of payload validation: the identifier must be a UUID and
    /// `updated_at` must not precede `created_at`.
    pub fn validate_response(&self) -> Result<(), ValidationError> {
        require_uuid(&self.id, "id")?;
        self.data.validate()?;
        if self.updated_at < self.created_at {
            return Err(ValidationError::new("updated at before created at"));
        }
        Ok(())
    }
}
