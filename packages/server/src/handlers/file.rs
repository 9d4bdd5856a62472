use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_common::{ParentTable, Validate};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::file::*;
use crate::models::shared::IdResponse;
use crate::repository::{EducationRepository, FileRepository, ProjectRepository, RepoError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Files",
    operation_id = "listFilesByParent",
    summary = "List the attachments of one owner",
    description = "`parent_table`, `parent_id` and `role` are all required. Newest first.",
    params(FileParentQuery),
    responses(
        (status = 200, description = "Attachments of the owner", body = Vec<FileResponse>),
        (status = 400, description = "Missing or unknown selector (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FileParentQuery>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let parent_table = query.parent_table()?;
    let parent_id = query.parent_id()?;
    let role = query.role()?;

    let files = FileRepository::new(&state.db, state.clock.as_ref())
        .find_by_parent(parent_table, parent_id, role)
        .await?;

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Files",
    operation_id = "createFile",
    summary = "Attach a file to an owner",
    description = "The owner named by `parent_table` and `parent_id` must exist.",
    request_body = FileRequest,
    responses(
        (status = 201, description = "File created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Owner not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(parent_table = %payload.parent_table, parent_id = %payload.parent_id))]
pub async fn create_file(
    State(state): State<AppState>,
    AppJson(payload): AppJson<FileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("file", e))?;
    // Rule checks first so a malformed parent id reports a validation error.
    payload
        .validate()
        .map_err(|e| RepoError::validation("file", e))?;
    ensure_parent_exists(&state, payload.parent_table, &payload.parent_id).await?;

    let id = FileRepository::new(&state.db, state.clock.as_ref())
        .create(&payload)
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "Files",
    operation_id = "deleteFilesByParent",
    summary = "Delete every attachment of one owner",
    description = "`parent_table` and `parent_id` are required. Deleting from an owner with no attachments succeeds with `deleted: 0`.",
    params(FileParentQuery),
    responses(
        (status = 200, description = "Attachments deleted", body = DeletedResponse),
        (status = 400, description = "Missing or unknown selector (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn delete_files_by_parent(
    State(state): State<AppState>,
    Query(query): Query<FileParentQuery>,
) -> Result<Json<DeletedResponse>, AppError> {
    let parent_table = query.parent_table()?;
    let parent_id = query.parent_id()?;

    let deleted = FileRepository::new(&state.db, state.clock.as_ref())
        .delete_by_parent(parent_table, parent_id)
        .await?;

    Ok(Json(DeletedResponse { deleted }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Files",
    operation_id = "getFile",
    summary = "Get a file by ID",
    params(("id" = String, Path, description = "File ID")),
    responses(
        (status = 200, description = "File details", body = FileResponse),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, AppError> {
    let file = FileRepository::new(&state.db, state.clock.as_ref())
        .find_by_id(&id)
        .await?;
    Ok(Json(file.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Files",
    operation_id = "updateFile",
    summary = "Replace a file's metadata",
    description = "The owner named by `parent_table` and `parent_id` must exist.",
    params(("id" = String, Path, description = "File ID")),
    request_body = FileRequest,
    responses(
        (status = 200, description = "File updated", body = FileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "File or new owner not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<FileRequest>,
) -> Result<Json<FileResponse>, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("file", e))?;
    payload
        .validate()
        .map_err(|e| RepoError::validation("file", e))?;
    ensure_parent_exists(&state, payload.parent_table, &payload.parent_id).await?;

    let file = FileRepository::new(&state.db, state.clock.as_ref())
        .update(&id, &payload)
        .await?
        .ok_or_else(|| RepoError::not_found("file", id.as_str()))?;

    Ok(Json(file.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Files",
    operation_id = "deleteFile",
    summary = "Delete a file",
    params(("id" = String, Path, description = "File ID")),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    FileRepository::new(&state.db, state.clock.as_ref())
        .delete(&id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_parent_exists(
    state: &AppState,
    parent_table: ParentTable,
    parent_id: &str,
) -> Result<(), AppError> {
    match parent_table {
        ParentTable::Projects => {
            ProjectRepository::new(&state.db, state.clock.as_ref())
                .get(parent_id)
                .await?;
        }
        ParentTable::Educations => {
            EducationRepository::new(&state.db, state.clock.as_ref())
                .get(parent_id)
                .await?;
        }
    }
    Ok(())
}
