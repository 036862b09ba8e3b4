use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Entity, MonthCount, NewSocialLog, Record, UserAccount};
use crate::database::query_builder::{execute, fetch_json_rows, QueryBuilder};
use crate::database::store::Store;
use crate::filter::{AppointmentFilter, OwnerSearch};
use crate::types::{ReportView, Row};

/// Postgres-backed gateway over a shared pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, email: &str, password: &str) -> Result<Option<UserAccount>, DatabaseError> {
        let user = sqlx::query_as::<_, UserAccount>(
            "SELECT id::bigint AS id, email FROM users WHERE email = $1 AND password = $2 LIMIT 1",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_role(&self, email: &str) -> Result<Option<String>, DatabaseError> {
        let role: Option<Option<String>> =
            sqlx::query_scalar("SELECT role::text FROM user_accounts WHERE email = $1 LIMIT 1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(role.flatten())
    }

    async fn select_all(&self, entity: Entity) -> Result<Vec<Row>, DatabaseError> {
        fetch_json_rows(&self.pool, &QueryBuilder::new(entity).select_all()).await
    }

    async fn select_by_id(&self, entity: Entity, id: i64) -> Result<Option<Row>, DatabaseError> {
        let rows = fetch_json_rows(&self.pool, &QueryBuilder::new(entity).select_by_id(id)).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: &Record) -> Result<(), DatabaseError> {
        execute(&self.pool, &QueryBuilder::insert(record))
            .await
            .map_err(|err| match err {
                DatabaseError::Sqlx(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    DatabaseError::Constraint(db.message().to_string())
                }
                other => other,
            })?;
        Ok(())
    }

    async fn update(&self, record: &Record) -> Result<u64, DatabaseError> {
        execute(&self.pool, &QueryBuilder::update(record)).await
    }

    async fn delete(&self, entity: Entity, id: i64) -> Result<u64, DatabaseError> {
        execute(&self.pool, &QueryBuilder::new(entity).delete(id)).await
    }

    async fn appointments_per_month(&self) -> Result<Vec<MonthCount>, DatabaseError> {
        let sql = QueryBuilder::appointments_per_month();
        let rows = sqlx::query_as::<_, MonthCount>(&sql.query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn select_view(&self, view: ReportView) -> Result<Vec<Row>, DatabaseError> {
        fetch_json_rows(&self.pool, &QueryBuilder::select_view(view)).await
    }

    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Row>, DatabaseError> {
        fetch_json_rows(&self.pool, &QueryBuilder::search_owners(search)).await
    }

    async fn search_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Row>, DatabaseError> {
        fetch_json_rows(&self.pool, &QueryBuilder::search_appointments(filter)).await
    }

    async fn insert_social_log(&self, entry: &NewSocialLog) -> Result<(), DatabaseError> {
        sqlx::query(QueryBuilder::insert_social_log())
            .bind(&entry.platform)
            .bind(&entry.title)
            .bind(&entry.username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn recent_social_logs(&self, limit: i64) -> Result<Vec<Row>, DatabaseError> {
        fetch_json_rows(&self.pool, &QueryBuilder::recent_social_logs(limit)).await
    }
}
