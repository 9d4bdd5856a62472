use std::collections::HashMap;

use catalog_common::{
    Clock, Project, ProjectFilter, ProjectPayload, Record, SortBy, Validate,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, Unchanged,
};
use tracing::instrument;

use super::{RepoError, RepoResult, decode_json, encode_json, new_id, order, require_id};
use crate::entity::project;

const ENTITY: &str = "project";

pub struct ProjectRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
    clock: &'a dyn Clock,
}

impl<'a, C: ConnectionTrait> ProjectRepository<'a, C> {
    pub fn new(conn: &'a C, clock: &'a dyn Clock) -> Self {
        Self { conn, clock }
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create(&self, payload: &ProjectPayload) -> RepoResult<String> {
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let id = new_id();
        let now = self.clock.now();

        let model = project::ActiveModel {
            id: Set(id.clone()),
            blur_hash: Set(payload.blur_hash.clone()),
            title: Set(payload.title.clone()),
            subtitle: Set(payload.subtitle.clone()),
            description: Set(payload.description.clone()),
            tags: Set(encode_json(&payload.tags, ENTITY)?),
            project_type: Set(payload.project_type),
            link: Set(payload.link.clone()),
            education_id: Set(payload.education_id.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        project::Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map_err(RepoError::storage("create", ENTITY))?;

        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> RepoResult<Project> {
        require_id(id, ENTITY)?;

        let model = project::Entity::find_by_id(id.to_owned())
            .one(self.conn)
            .await
            .map_err(RepoError::storage("get", ENTITY))?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        into_project(model)
    }

    /// Full-payload update. `Ok(None)` when no row has this id.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: &ProjectPayload) -> RepoResult<Option<Project>> {
        require_id(id, ENTITY)?;
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let model = project::ActiveModel {
            id: Unchanged(id.to_owned()),
            blur_hash: Set(payload.blur_hash.clone()),
            title: Set(payload.title.clone()),
            subtitle: Set(payload.subtitle.clone()),
            description: Set(payload.description.clone()),
            tags: Set(encode_json(&payload.tags, ENTITY)?),
            project_type: Set(payload.project_type),
            link: Set(payload.link.clone()),
            education_id: Set(payload.education_id.clone()),
            created_at: NotSet,
            updated_at: Set(self.clock.now()),
        };

        match model.update(self.conn).await {
            Ok(updated) => into_project(updated).map(Some),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(RepoError::storage("update", ENTITY)(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        require_id(id, ENTITY)?;

        let result = project::Entity::delete_by_id(id.to_owned())
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("delete", ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found(ENTITY, id));
        }
        Ok(())
    }

    /// One page of projects, optionally restricted to a single type.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ProjectFilter) -> RepoResult<Vec<Project>> {
        let page = filter.page;
        let direction = order(page.direction);

        let models = filtered(filter)
            .order_by(sort_column(page.sort_by), direction.clone())
            .order_by(project::Column::Id, direction)
            .offset(page.offset())
            .limit(page.page_size)
            .all(self.conn)
            .await
            .map_err(RepoError::storage("list", ENTITY))?;

        models.into_iter().map(into_project).collect()
    }

    /// Number of projects matching the filter predicate, ignoring paging.
    #[instrument(skip(self))]
    pub async fn count(&self, filter: &ProjectFilter) -> RepoResult<u64> {
        filtered(filter)
            .count(self.conn)
            .await
            .map_err(RepoError::storage("count", ENTITY))
    }

    /// Projects linked to one education, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_education_id(&self, education_id: &str) -> RepoResult<Vec<Project>> {
        let mut grouped = self
            .list_by_education_ids(&[education_id.to_owned()])
            .await?;
        Ok(grouped.remove(education_id).unwrap_or_default())
    }

    /// Projects grouped by education id in a single query.
    ///
    /// Every requested id is a key of the result, mapped to an empty list when
    /// no project references it. An empty input returns an empty map without
    /// touching the store.
    #[instrument(skip(self, education_ids), fields(educations = education_ids.len()))]
    pub async fn list_by_education_ids(
        &self,
        education_ids: &[String],
    ) -> RepoResult<HashMap<String, Vec<Project>>> {
        let mut grouped: HashMap<String, Vec<Project>> = education_ids
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        if education_ids.is_empty() {
            return Ok(grouped);
        }

        let models = project::Entity::find()
            .filter(project::Column::EducationId.is_in(education_ids.iter().cloned()))
            .order_by_asc(project::Column::EducationId)
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(self.conn)
            .await
            .map_err(RepoError::storage("list", ENTITY))?;

        for model in models {
            let project = into_project(model)?;
            if let Some(education_id) = project.data.education_id.clone() {
                grouped.entry(education_id).or_default().push(project);
            }
        }
        Ok(grouped)
    }

    /// Clear `education_id` on every project pointing at `education_id`.
    #[instrument(skip(self))]
    pub async fn detach_education(&self, education_id: &str) -> RepoResult<u64> {
        let result = project::Entity::update_many()
            .col_expr(project::Column::EducationId, Expr::value(None::<String>))
            .col_expr(project::Column::UpdatedAt, Expr::value(self.clock.now()))
            .filter(project::Column::EducationId.eq(education_id))
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("detach", ENTITY))?;

        Ok(result.rows_affected)
    }
}

fn filtered(filter: &ProjectFilter) -> Select<project::Entity> {
    let mut select = project::Entity::find();
    if let Some(project_type) = filter.project_type {
        select = select.filter(project::Column::ProjectType.eq(project_type));
    }
    select
}

fn sort_column(sort_by: SortBy) -> project::Column {
    match sort_by {
        SortBy::CreatedAt => project::Column::CreatedAt,
        SortBy::UpdatedAt => project::Column::UpdatedAt,
    }
}

fn into_project(model: project::Model) -> RepoResult<Project> {
    let project = Record {
        data: ProjectPayload {
            blur_hash: model.blur_hash,
            title: model.title,
            subtitle: model.subtitle,
            description: model.description,
            tags: decode_json(&model.tags, "tags", ENTITY)?,
            project_type: model.project_type,
            link: model.link,
            education_id: model.education_id,
        },
        id: model.id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    };
    project
        .validate_response()
        .map_err(|e| RepoError::corrupt(ENTITY, e))?;
    Ok(project)
}
