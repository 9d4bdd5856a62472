use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_common::{Education, FileRole, ParentTable, Project};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::education::*;
use crate::models::project::ProjectResponse;
use crate::models::shared::{IdResponse, Pagination};
use crate::repository::{EducationRepository, FileRepository, ProjectRepository, RepoError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Educations",
    operation_id = "createEducation",
    summary = "Create an education record",
    description = "Validates the main school, every additional school period and the level, then stores the record.",
    request_body = EducationRequest,
    responses(
        (status = 201, description = "Education created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_education(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EducationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("education", e))?;

    let id = EducationRepository::new(&state.db, state.clock.as_ref())
        .create(&payload)
        .await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Educations",
    operation_id = "listEducations",
    summary = "List education records with pagination",
    description = "Returns one page of education records, each with the projects that reference it. Projects and their previews are each fetched in one batch for the whole page.",
    params(EducationListQuery),
    responses(
        (status = 200, description = "List of education records", body = EducationListResponse),
        (status = 400, description = "Unknown sort field (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_educations(
    State(state): State<AppState>,
    Query(query): Query<EducationListQuery>,
) -> Result<Json<EducationListResponse>, AppError> {
    let filter = query.into_filter()?;
    let educations = EducationRepository::new(&state.db, state.clock.as_ref());

    let total = educations.count(&filter).await?;
    let page = educations.list(&filter).await?;

    let ids: Vec<String> = page.iter().map(|e| e.id.clone()).collect();
    let projects = ProjectRepository::new(&state.db, state.clock.as_ref())
        .list_by_education_ids(&ids)
        .await?;
    let mut projects = with_previews(&state, projects).await?;

    let data = page
        .into_iter()
        .map(|education| {
            let projects = projects.remove(&education.id).unwrap_or_default();
            EducationResponse::new(education, projects)
        })
        .collect();

    Ok(Json(EducationListResponse {
        data,
        pagination: Pagination::new(&filter.page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Educations",
    operation_id = "getEducation",
    summary = "Get an education record by ID",
    params(("id" = String, Path, description = "Education ID")),
    responses(
        (status = 200, description = "Education with its projects", body = EducationResponse),
        (status = 404, description = "Education not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EducationResponse>, AppError> {
    let education = EducationRepository::new(&state.db, state.clock.as_ref())
        .get(&id)
        .await?;
    Ok(Json(respond(&state, education).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Educations",
    operation_id = "updateEducation",
    summary = "Replace an education record",
    params(("id" = String, Path, description = "Education ID")),
    request_body = EducationRequest,
    responses(
        (status = 200, description = "Education updated", body = EducationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Education not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<EducationRequest>,
) -> Result<Json<EducationResponse>, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("education", e))?;

    let education = EducationRepository::new(&state.db, state.clock.as_ref())
        .update(&id, &payload)
        .await?
        .ok_or_else(|| RepoError::not_found("education", id.as_str()))?;

    Ok(Json(respond(&state, education).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Educations",
    operation_id = "deleteEducation",
    summary = "Delete an education record and its attachments",
    description = "In one transaction: deletes the record's attachments, clears `education_id` on projects that reference it, then deletes the record. Projects themselves are kept.",
    params(("id" = String, Path, description = "Education ID")),
    responses(
        (status = 204, description = "Education deleted"),
        (status = 404, description = "Education not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    FileRepository::new(&txn, state.clock.as_ref())
        .delete_by_parent(ParentTable::Educations, &id)
        .await?;
    ProjectRepository::new(&txn, state.clock.as_ref())
        .detach_education(&id)
        .await?;
    EducationRepository::new(&txn, state.clock.as_ref())
        .delete(&id)
        .await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn respond(state: &AppState, education: Education) -> Result<EducationResponse, AppError> {
    let projects = ProjectRepository::new(&state.db, state.clock.as_ref())
        .list_by_education_id(&education.id)
        .await?;

    let ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();
    let mut previews = FileRepository::new(&state.db, state.clock.as_ref())
        .find_by_parents(ParentTable::Projects, &ids, FileRole::Image)
        .await?;

    Ok(EducationResponse::new(
        education,
        ProjectResponse::join(projects, &mut previews),
    ))
}

/// Attach previews to grouped projects with a single attachment lookup.
async fn with_previews(
    state: &AppState,
    grouped: HashMap<String, Vec<Project>>,
) -> Result<HashMap<String, Vec<ProjectResponse>>, AppError> {
    let project_ids: Vec<String> = grouped
        .values()
        .flatten()
        .map(|p| p.id.clone())
        .collect();
    let mut previews = FileRepository::new(&state.db, state.clock.as_ref())
        .find_by_parents(ParentTable::Projects, &project_ids, FileRole::Image)
        .await?;

    Ok(grouped
        .into_iter()
        .map(|(education_id, projects)| {
            (education_id, ProjectResponse::join(projects, &mut previews))
        })
        .collect())
}
