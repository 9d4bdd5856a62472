use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_common::{FileRole, ParentTable, Validate};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::file::FileResponse;
use crate::models::project::*;
use crate::models::shared::{IdResponse, Pagination};
use crate::repository::{FileRepository, ProjectRepository, RepoError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a project",
    description = "Validates and stores a project. Preview images in `previews` are stored as `image` attachments of the new project in the same transaction; every preview is validated before anything is written.",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_project(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (project, previews) = payload
        .into_parts()
        .map_err(|e| RepoError::validation("project", e))?;
    project
        .validate()
        .map_err(|e| RepoError::validation("project", e))?;
    for (i, preview) in previews.iter().enumerate() {
        preview
            .validate()
            .map_err(|e| RepoError::validation("project", e.within(format!("preview[{i}]"))))?;
    }

    let txn = state.db.begin().await?;

    let id = ProjectRepository::new(&txn, state.clock.as_ref())
        .create(&project)
        .await?;

    let files = FileRepository::new(&txn, state.clock.as_ref());
    for preview in previews {
        files.create(&preview.into_payload(&id)).await?;
    }

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects with pagination",
    description = "Returns one page of projects, each with its preview images. Previews for the whole page are fetched in one query. Out-of-range `page` and `page_size` values are clamped.",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse),
        (status = 400, description = "Unknown sort field or project type (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let filter = query.into_filter()?;
    let projects = ProjectRepository::new(&state.db, state.clock.as_ref());

    let total = projects.count(&filter).await?;
    let page = projects.list(&filter).await?;

    let ids: Vec<String> = page.iter().map(|p| p.id.clone()).collect();
    let mut previews = FileRepository::new(&state.db, state.clock.as_ref())
        .find_by_parents(ParentTable::Projects, &ids, FileRole::Image)
        .await?;

    Ok(Json(ProjectListResponse {
        data: ProjectResponse::join(page, &mut previews),
        pagination: Pagination::new(&filter.page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project by ID",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project with its previews", body = ProjectResponse),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let project = ProjectRepository::new(&state.db, state.clock.as_ref())
        .get(&id)
        .await?;
    let previews = find_previews(&state, &id).await?;

    Ok(Json(ProjectResponse::new(project, previews)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Replace a project",
    description = "Full-payload update. Every field is replaced; `created_at` is kept and `updated_at` is set to now. Previews are not touched.",
    params(("id" = String, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("project", e))?;

    let project = ProjectRepository::new(&state.db, state.clock.as_ref())
        .update(&id, &payload)
        .await?
        .ok_or_else(|| RepoError::not_found("project", id.as_str()))?;
    let previews = find_previews(&state, &id).await?;

    Ok(Json(ProjectResponse::new(project, previews)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project and its attachments",
    description = "Deletes the project's attachments and then the project inside one transaction.",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    FileRepository::new(&txn, state.clock.as_ref())
        .delete_by_parent(ParentTable::Projects, &id)
        .await?;
    ProjectRepository::new(&txn, state.clock.as_ref())
        .delete(&id)
        .await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_previews(state: &AppState, project_id: &str) -> Result<Vec<FileResponse>, AppError> {
    let files = FileRepository::new(&state.db, state.clock.as_ref())
        .find_by_parent(ParentTable::Projects, project_id, FileRole::Image)
        .await?;
    Ok(files.into_iter().map(FileResponse::from).collect())
}
