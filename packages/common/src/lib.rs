pub mod blurhash;
pub mod clock;
pub mod education;
pub mod file;
pub mod listing;
pub mod project;
pub mod record;
pub mod skill;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use education::{Education, EducationLevel, EducationPayload, SchoolPeriod};
pub use file::{File, FilePayload, FileRole, ParentTable};
pub use listing::{
    EducationFilter, PageQuery, ProjectFilter, SkillFilter, SortBy, SortDirection,
};
pub use project::{Project, ProjectPayload, ProjectType};
pub use record::Record;
pub use skill::{Skill, SkillCategory, SkillPayload};
pub use validation::{Validate, ValidationError};
