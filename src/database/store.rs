use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Entity, MonthCount, NewSocialLog, Record, UserAccount};
use crate::filter::{AppointmentFilter, OwnerSearch};
use crate::types::{ReportView, Row};

/// The persistence gateway. Each method is one parameterized statement.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by `/health` and the startup check
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Plaintext credential match against `users`
    async fn find_user(&self, email: &str, password: &str) -> Result<Option<UserAccount>, DatabaseError>;

    /// First `user_accounts.role` for the email; `None` when no row or a null role
    async fn find_role(&self, email: &str) -> Result<Option<String>, DatabaseError>;

    async fn select_all(&self, entity: Entity) -> Result<Vec<Row>, DatabaseError>;

    async fn select_by_id(&self, entity: Entity, id: i64) -> Result<Option<Row>, DatabaseError>;

    /// Fails with a constraint error when the primary key is taken
    async fn insert(&self, record: &Record) -> Result<(), DatabaseError>;

    /// Overwrites every non-key column; returns affected rows
    async fn update(&self, record: &Record) -> Result<u64, DatabaseError>;

    async fn delete(&self, entity: Entity, id: i64) -> Result<u64, DatabaseError>;

    async fn appointments_per_month(&self) -> Result<Vec<MonthCount>, DatabaseError>;

    async fn select_view(&self, view: ReportView) -> Result<Vec<Row>, DatabaseError>;

    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Row>, DatabaseError>;

    async fn search_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Row>, DatabaseError>;

    async fn insert_social_log(&self, entry: &NewSocialLog) -> Result<(), DatabaseError>;

    /// Newest first
    async fn recent_social_logs(&self, limit: i64) -> Result<Vec<Row>, DatabaseError>;
}
