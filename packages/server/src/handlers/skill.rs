use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::shared::{IdResponse, Pagination};
use crate::models::skill::*;
use crate::repository::{RepoError, SkillRepository};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Skills",
    operation_id = "createSkill",
    summary = "Create a skill",
    description = "`hex_color` must be `#RGB` or `#RRGGBB`.",
    request_body = SkillRequest,
    responses(
        (status = 201, description = "Skill created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(label = %payload.label))]
pub async fn create_skill(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SkillRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("skill", e))?;

    let id = SkillRepository::new(&state.db, state.clock.as_ref())
        .create(&payload)
        .await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Skills",
    operation_id = "listSkills",
    summary = "List skills with pagination",
    params(SkillListQuery),
    responses(
        (status = 200, description = "List of skills", body = SkillListResponse),
        (status = 400, description = "Unknown sort field or category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<SkillListQuery>,
) -> Result<Json<SkillListResponse>, AppError> {
    let filter = query.into_filter()?;
    let skills = SkillRepository::new(&state.db, state.clock.as_ref());

    let total = skills.count(&filter).await?;
    let data = skills
        .list(&filter)
        .await?
        .into_iter()
        .map(SkillResponse::from)
        .collect();

    Ok(Json(SkillListResponse {
        data,
        pagination: Pagination::new(&filter.page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Skills",
    operation_id = "getSkill",
    summary = "Get a skill by ID",
    params(("id" = String, Path, description = "Skill ID")),
    responses(
        (status = 200, description = "Skill details", body = SkillResponse),
        (status = 404, description = "Skill not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SkillResponse>, AppError> {
    let skill = SkillRepository::new(&state.db, state.clock.as_ref())
        .get(&id)
        .await?;
    Ok(Json(skill.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Skills",
    operation_id = "updateSkill",
    summary = "Replace a skill",
    params(("id" = String, Path, description = "Skill ID")),
    request_body = SkillRequest,
    responses(
        (status = 200, description = "Skill updated", body = SkillResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Skill not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SkillRequest>,
) -> Result<Json<SkillResponse>, AppError> {
    let payload = payload
        .into_payload()
        .map_err(|e| RepoError::validation("skill", e))?;

    let skill = SkillRepository::new(&state.db, state.clock.as_ref())
        .update(&id, &payload)
        .await?
        .ok_or_else(|| RepoError::not_found("skill", id.as_str()))?;

    Ok(Json(skill.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Skills",
    operation_id = "deleteSkill",
    summary = "Delete a skill",
    params(("id" = String, Path, description = "Skill ID")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 404, description = "Skill not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    SkillRepository::new(&state.db, state.clock.as_ref())
        .delete(&id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
