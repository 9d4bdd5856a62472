use catalog_common::{
    Clock, Education, EducationFilter, EducationPayload, Record, SortBy, Validate,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set, Unchanged,
};
use tracing::instrument;

use super::{RepoError, RepoResult, decode_json, encode_json, new_id, order, require_id};
use crate::entity::education;

const ENTITY: &str = "education";

pub struct EducationRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
    clock: &'a dyn Clock,
}

impl<'a, C: ConnectionTrait> EducationRepository<'a, C> {
    pub fn new(conn: &'a C, clock: &'a dyn Clock) -> Self {
        Self { conn, clock }
    }

    #[instrument(skip(self, payload), fields(level = %payload.level))]
    pub async fn create(&self, payload: &EducationPayload) -> RepoResult<String> {
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let id = new_id();
        let now = self.clock.now();

        let model = education::ActiveModel {
            id: Set(id.clone()),
            main_school: Set(encode_json(&payload.main_school, ENTITY)?),
            school_periods: Set(encode_json(&payload.school_periods, ENTITY)?),
            level: Set(payload.level),
            created_at: Set(now),
            updated_at: Set(now),
        };

        education::Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map_err(RepoError::storage("create", ENTITY))?;

        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> RepoResult<Education> {
        require_id(id, ENTITY)?;

        let model = education::Entity::find_by_id(id.to_owned())
            .one(self.conn)
            .await
            .map_err(RepoError::storage("get", ENTITY))?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        into_education(model)
    }

    /// Full-payload update. `Ok(None)` when no row has this id.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: &str,
        payload: &EducationPayload,
    ) -> RepoResult<Option<Education>> {
        require_id(id, ENTITY)?;
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let model = education::ActiveModel {
            id: Unchanged(id.to_owned()),
            main_school: Set(encode_json(&payload.main_school, ENTITY)?),
            school_periods: Set(encode_json(&payload.school_periods, ENTITY)?),
            level: Set(payload.level),
            created_at: NotSet,
            updated_at: Set(self.clock.now()),
        };

        match model.update(self.conn).await {
            Ok(updated) => into_education(updated).map(Some),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(RepoError::storage("update", ENTITY)(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        require_id(id, ENTITY)?;

        let result = education::Entity::delete_by_id(id.to_owned())
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("delete", ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found(ENTITY, id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &EducationFilter) -> RepoResult<Vec<Education>> {
        let page = filter.page;
        let direction = order(page.direction);
        let sort_column = match page.sort_by {
            SortBy::CreatedAt => education::Column::CreatedAt,
            SortBy::UpdatedAt => education::Column::UpdatedAt,
        };

        let models = education::Entity::find()
            .order_by(sort_column, direction.clone())
            .order_by(education::Column::Id, direction)
            .offset(page.offset())
            .limit(page.page_size)
            .all(self.conn)
            .await
            .map_err(RepoError::storage("list", ENTITY))?;

        models.into_iter().map(into_education).collect()
    }

    #[instrument(skip(self))]
    pub async fn count(&self, _filter: &EducationFilter) -> RepoResult<u64> {
        education::Entity::find()
            .count(self.conn)
            .await
            .map_err(RepoError::storage("count", ENTITY))
    }
}

fn into_education(model: education::Model) -> RepoResult<Education> {
    let education = Record {
        data: EducationPayload {
            main_school: decode_json(&model.main_school, "main school", ENTITY)?,
            school_periods: decode_json(&model.school_periods, "school periods", ENTITY)?,
            level: model.level,
        },
        id: model.id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    };
    education
        .validate_response()
        .map_err(|e| RepoError::corrupt(ENTITY, e))?;
    Ok(education)
}
