pub mod education;
pub mod file;
pub mod project;
pub mod skill;
