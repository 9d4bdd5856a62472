use std::collections::HashMap;

use catalog_common::{
    Clock, File, FilePayload, FileRole, ParentTable, Record, Validate, ValidationError,
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};
use tracing::instrument;

use super::{RepoError, RepoResult, new_id, require_id};
use crate::entity::{education, file, project};

const ENTITY: &str = "file";

/// The attachment store: one table of file metadata shared by every owner kind.
///
/// The store never checks that the owner exists. Callers write the parent
/// first and remove attachments before (or together with) the parent.
pub struct FileRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
    clock: &'a dyn Clock,
}

impl<'a, C: ConnectionTrait> FileRepository<'a, C> {
    pub fn new(conn: &'a C, clock: &'a dyn Clock) -> Self {
        Self { conn, clock }
    }

    /// Attachments of one owner with the given role, newest first.
    #[instrument(skip(self))]
    pub async fn find_by_parent(
        &self,
        parent_table: ParentTable,
        parent_id: &str,
        role: FileRole,
    ) -> RepoResult<Vec<File>> {
        if parent_id.trim().is_empty() {
            return Err(RepoError::validation(
                ENTITY,
                ValidationError::missing("parent_id"),
            ));
        }

        let models = file::Entity::find()
            .filter(file::Column::ParentTable.eq(parent_table))
            .filter(file::Column::ParentId.eq(parent_id))
            .filter(file::Column::Role.eq(role))
            .order_by_desc(file::Column::CreatedAt)
            .order_by_desc(file::Column::Id)
            .all(self.conn)
            .await
            .map_err(RepoError::storage("find", ENTITY))?;

        models.into_iter().map(into_file).collect()
    }

    /// Batch form of [`find_by_parent`](Self::find_by_parent).
    ///
    /// Every requested parent id has an entry in the result, empty when it owns
    /// no matching attachment. An empty `parent_ids` returns an empty map
    /// without touching the store.
    #[instrument(skip(self, parent_ids), fields(parents = parent_ids.len()))]
    pub async fn find_by_parents(
        &self,
        parent_table: ParentTable,
        parent_ids: &[String],
        role: FileRole,
    ) -> RepoResult<HashMap<String, Vec<File>>> {
        let mut grouped: HashMap<String, Vec<File>> = parent_ids
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        if parent_ids.is_empty() {
            return Ok(grouped);
        }

        let models = file::Entity::find()
            .filter(file::Column::ParentTable.eq(parent_table))
            .filter(file::Column::ParentId.is_in(parent_ids.iter().cloned()))
            .filter(file::Column::Role.eq(role))
            .order_by_asc(file::Column::ParentId)
            .order_by_desc(file::Column::CreatedAt)
            .order_by_desc(file::Column::Id)
            .all(self.conn)
            .await
            .map_err(RepoError::storage("find", ENTITY))?;

        for model in models {
            let file = into_file(model)?;
            grouped
                .entry(file.data.parent_id.clone())
                .or_default()
                .push(file);
        }
        Ok(grouped)
    }

    #[instrument(skip(self, payload), fields(parent_table = %payload.parent_table, parent_id = %payload.parent_id))]
    pub async fn create(&self, payload: &FilePayload) -> RepoResult<String> {
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let id = new_id();
        let now = self.clock.now();

        let model = file::ActiveModel {
            id: Set(id.clone()),
            parent_table: Set(payload.parent_table),
            parent_id: Set(payload.parent_id.clone()),
            role: Set(payload.role),
            name: Set(payload.name.clone()),
            url: Set(payload.url.clone()),
            mime_type: Set(payload.mime_type.clone()),
            size: Set(payload.size),
            created_at: Set(now),
            updated_at: Set(now),
        };

        file::Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map_err(RepoError::storage("create", ENTITY))?;

        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> RepoResult<File> {
        require_id(id, ENTITY)?;

        let model = file::Entity::find_by_id(id.to_owned())
            .one(self.conn)
            .await
            .map_err(RepoError::storage("get", ENTITY))?
            .ok_or_else(|| RepoError::not_found(ENTITY, id))?;

        into_file(model)
    }

    /// Full-payload update. `Ok(None)` when no row has this id.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: &FilePayload) -> RepoResult<Option<File>> {
        require_id(id, ENTITY)?;
        payload
            .validate()
            .map_err(|e| RepoError::validation(ENTITY, e))?;

        let model = file::ActiveModel {
            id: Unchanged(id.to_owned()),
            parent_table: Set(payload.parent_table),
            parent_id: Set(payload.parent_id.clone()),
            role: Set(payload.role),
            name: Set(payload.name.clone()),
            url: Set(payload.url.clone()),
            mime_type: Set(payload.mime_type.clone()),
            size: Set(payload.size),
            created_at: NotSet,
            updated_at: Set(self.clock.now()),
        };

        match model.update(self.conn).await {
            Ok(updated) => into_file(updated).map(Some),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(e) => Err(RepoError::storage("update", ENTITY)(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        require_id(id, ENTITY)?;

        let result = file::Entity::delete_by_id(id.to_owned())
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("delete", ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found(ENTITY, id));
        }
        Ok(())
    }

    /// Remove every attachment of one owner, whatever its role.
    ///
    /// Returns the number of rows removed. An owner without attachments is not
    /// an error.
    #[instrument(skip(self))]
    pub async fn delete_by_parent(
        &self,
        parent_table: ParentTable,
        parent_id: &str,
    ) -> RepoResult<u64> {
        if parent_id.trim().is_empty() {
            return Err(RepoError::validation(
                ENTITY,
                ValidationError::missing("parent_id"),
            ));
        }

        let result = file::Entity::delete_many()
            .filter(file::Column::ParentTable.eq(parent_table))
            .filter(file::Column::ParentId.eq(parent_id))
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("delete", ENTITY))?;

        Ok(result.rows_affected)
    }

    /// Compensating sweep: delete attachments of `parent_table` whose owner row
    /// no longer exists. Running it twice removes nothing the second time.
    #[instrument(skip(self))]
    pub async fn delete_orphans(&self, parent_table: ParentTable) -> RepoResult<u64> {
        let owners = match parent_table {
            ParentTable::Projects => Query::select()
                .column(project::Column::Id)
                .from(project::Entity)
                .to_owned(),
            ParentTable::Educations => Query::select()
                .column(education::Column::Id)
                .from(education::Entity)
                .to_owned(),
        };

        let result = file::Entity::delete_many()
            .filter(file::Column::ParentTable.eq(parent_table))
            .filter(file::Column::ParentId.not_in_subquery(owners))
            .exec(self.conn)
            .await
            .map_err(RepoError::storage("sweep", ENTITY))?;

        if result.rows_affected > 0 {
            tracing::info!(removed = result.rows_affected, "Removed orphaned attachments");
        }
        Ok(result.rows_affected)
    }
}

fn into_file(model: file::Model) -> RepoResult<File> {
    let file = Record {
        id: model.id,
        data: FilePayload {
            parent_table: model.parent_table,
            parent_id: model.parent_id,
            role: model.role,
            name: model.name,
            url: model.url,
            mime_type: model.mime_type,
            size: model.size,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    };
    file.validate_response()
        .map_err(|e| RepoError::corrupt(ENTITY, e))?;
    Ok(file)
}
