use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/projects", project_routes())
        .nest("/educations", education_routes())
        .nest("/skills", skill_routes())
        .nest("/files", file_routes())
}

fn project_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::project::list_projects,
            handlers::project::create_project
        ))
        .routes(routes!(
            handlers::project::get_project,
            handlers::project::update_project,
            handlers::project::delete_project
        ))
}

fn education_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::education::list_educations,
            handlers::education::create_education
        ))
        .routes(routes!(
            handlers::education::get_education,
            handlers::education::update_education,
            handlers::education::delete_education
        ))
}

fn skill_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::skill::list_skills,
            handlers::skill::create_skill
        ))
        .routes(routes!(
            handlers::skill::get_skill,
            handlers::skill::update_skill,
            handlers::skill::delete_skill
        ))
}

fn file_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::file::list_files,
            handlers::file::create_file,
            handlers::file::delete_files_by_parent
        ))
        .routes(routes!(
            handlers::file::get_file,
            handlers::file::update_file,
            handlers::file::delete_file
        ))
}
