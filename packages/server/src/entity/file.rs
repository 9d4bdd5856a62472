use catalog_common::{FileRole, ParentTable};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attachment metadata owned by a row of another table.
///
/// `(parent_table, parent_id)` is a polymorphic reference, so there is no
/// foreign key; the owner must exist when the row is written.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub parent_table: ParentTable,
    pub parent_id: String,
    pub role: FileRole,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    #[sea_orm(column_name = "type")]
    pub mime_type: String,
    pub size: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
