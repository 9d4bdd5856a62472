use std::time::Duration;

use sea_orm::sea_query::{
    Index, IndexCreateStatement, MysqlQueryBuilder, PostgresQueryBuilder, SqliteQueryBuilder,
    TableCreateStatement,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    Schema,
};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::{education, file, project, skill};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    create_schema(&db).await?;

    Ok(db)
}

/// Create every catalog table that does not exist yet, then its indexes.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    create_table(db, backend, education::Entity).await?;
    create_table(db, backend, project::Entity).await?;
    create_table(db, backend, skill::Entity).await?;
    create_table(db, backend, file::Entity).await?;

    ensure_indexes(db).await
}

async fn create_table<C, E>(db: &C, backend: DbBackend, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let stmt = Schema::new(backend)
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned();

    db.execute_unprepared(&table_sql(backend, &stmt)).await?;
    Ok(())
}

/// Ensure the secondary indexes used by attachment lookups and education
/// aggregation exist.
pub async fn ensure_indexes<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    // FindByParent / DeleteByParent:
    // WHERE parent_table = ? AND parent_id = ? [AND role = ?]
    let attachments = Index::create()
        .if_not_exists()
        .name("idx_files_parent_role")
        .table(file::Entity)
        .col(file::Column::ParentTable)
        .col(file::Column::ParentId)
        .col(file::Column::Role)
        .to_owned();

    // ListByEducationIDs: WHERE education_id IN (...)
    let projects_by_education = Index::create()
        .if_not_exists()
        .name("idx_projects_education_id")
        .table(project::Entity)
        .col(project::Column::EducationId)
        .to_owned();

    for (name, stmt) in [
        ("idx_files_parent_role", attachments),
        ("idx_projects_education_id", projects_by_education),
    ] {
        match db.execute_unprepared(&index_sql(backend, &stmt)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}

fn table_sql(backend: DbBackend, stmt: &TableCreateStatement) -> String {
    match backend {
        DbBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DbBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
        _ => stmt.to_string(MysqlQueryBuilder),
    }
}

fn index_sql(backend: DbBackend, stmt: &IndexCreateStatement) -> String {
    match backend {
        DbBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DbBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
        _ => stmt.to_string(MysqlQueryBuilder),
    }
}
