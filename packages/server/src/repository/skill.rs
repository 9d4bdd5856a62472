use catalog_common::{Clock, Record, Skill, SkillFilter, SkillPayload, SortBy, Validate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, Unchanged,
};
use tracing::instrument;

use super::{RepoError, RepoResult, new_id, order, require_id};
use crate::entity::skill;

const ENTITY: &str = "skill";

pub struct SkillRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
    clock: &'a dyn Clock,
}

impl<'a, C: ConnectionTrait> SkillRepository<'a, C> {
    pub fn new(conn: &'a C, clock: &'a dyn Clock) -> Self {
        Self { conn, clock }
    }

    #[instrument(skip(self, payload), fields(label = %payload.label))]
    pub async fn create(&self, payload: &SkillPayload) -> RepoResult<String> {
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let id = new_id();
        let now = self.clock.now();

        let model = skill::ActiveModel {
            id: Set(id.clone()),
            icon: Set(payload.icon.clone()),
            hex_color: Set(payload.hex_color.clone()),
            label: Set(payload.label.clone()),
            category: Set(payload.category),
            created_at: Set(now),
            updated_at: Set(now),
        };

        skill::Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map_err(RepoError::storage("create", ENTITY))?;

        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> RepoResult<Skill> {
        require_id(id, ENTITY)?;

        let model = skill::Entity::find_by_id(id.to_owned())
            .one(self.conn)
            .await
            .map_err(RepoError::storage("get", ENTITY))?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        into_skill(model)
    }

    /// Full-payload update. `Ok(None)` when no row has this id.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: &SkillPayload) -> RepoResult<Option<Skill>> {
        require_id(id, ENTITY)?;
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let model = skill::ActiveModel {
            id: Unchanged(id.to_owned()),
            icon: Set(payload.icon.clone()),
            hex_color: Set(payload.hex_color.clone()),
            label: Set(payload.label.clone()),
            category: Set(payload.category),
            created_at: NotSet,
            updated_at: Set(self.clock.now()),
        };

        match model.update(self.conn).await {
            Ok(updated) => into_skill(updated).map(Some),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(RepoError::storage("update", ENTITY)(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        require_id(id, ENTITY)?;

        let result = skill::Entity::delete_by_id(id.to_owned())
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("delete", ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found(ENTITY, id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &SkillFilter) -> RepoResult<Vec<Skill>> {
        let page = filter.page;
        let direction = order(page.direction);
        let sort_column = match page.sort_by {
            SortBy::CreatedAt => skill::Column::CreatedAt,
            SortBy::UpdatedAt => skill::Column::UpdatedAt,
        };

        let models = filtered(filter)
            .order_by(sort_column, direction.clone())
            .order_by(skill::Column::Id, direction)
            .offset(page.offset())
            .limit(page.page_size)
            .all(self.conn)
            .await
            .map_err(RepoError::storage("list", ENTITY))?;

        models.into_iter().map(into_skill).collect()
    }

    #[instrument(skip(self))]
    pub async fn count(&self, filter: &SkillFilter) -> RepoResult<u64> {
        filtered(filter)
            .count(self.conn)
            .await
            .map_err(RepoError::storage("count", ENTITY))
    }
}

fn filtered(filter: &SkillFilter) -> Select<skill::Entity> {
    let mut select = skill::Entity::find();
    if let Some(category) = filter.category {
        select = select.filter(skill::Column::Category.eq(category));
    }
    select
}

fn into_skill(model: skill::Model) -> RepoResult<Skill> {
    let skill = Record {
        id: model.id,
        data: SkillPayload {
            icon: model.icon,
            hex_color: model.hex_color,
            label: model.label,
            category: model.category,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    };
    skill
        .validate_response()
        .map_err(|e| RepoError::corrupt(ENTITY, e))?;
    Ok(skill)
}
