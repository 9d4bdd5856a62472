use catalog_common::EducationLevel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "educations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Serialized `SchoolPeriod`.
    #[sea_orm(column_type = "Text")]
    pub main_school: String,
    /// Serialized `Vec<SchoolPeriod>`.
    #[sea_orm(column_type = "Text")]
    pub school_periods: String,

    pub level: EducationLevel,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
