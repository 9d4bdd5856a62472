mod education;
mod file;
mod repository;
mod skill;
