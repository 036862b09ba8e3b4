use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Entity, MonthCount, NewSocialLog, Record, UserAccount};
use crate::database::store::Store;
use crate::filter::{field_text, AppointmentFilter, OwnerSearch};
use crate::types::{ReportView, Row};

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
struct SocialEntry {
    id: i64,
    entry: NewSocialLog,
    logged_at: NaiveDateTime,
}

impl SocialEntry {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("id".into(), Value::from(self.id));
        row.insert("platform".into(), Value::from(self.entry.platform.clone()));
        row.insert("title".into(), Value::from(self.entry.title.clone()));
        row.insert("username".into(), Value::from(self.entry.username.clone()));
        row.insert(
            "logged_at".into(),
            Value::from(self.logged_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        );
        row
    }
}

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<Entity, BTreeMap<i64, Record>>,
    users: Vec<StoredUser>,
    roles: Vec<(String, Option<String>)>,
    views: HashMap<ReportView, Vec<Row>>,
    social: Vec<SocialEntry>,
    social_capacity: Option<usize>,
}

/// In-process gateway with the same contract as the Postgres store.
///
/// Backs the integration tests and local runs without a database. `set_offline`
/// makes every call fail the way an unreachable database does.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, id: i64, email: &str, password: &str, role: Option<&str>) {
        let mut tables = self.tables.write().await;
        tables.users.push(StoredUser {
            id,
            email: email.to_string(),
            password: password.to_string(),
        });
        tables.roles.push((email.to_string(), role.map(str::to_string)));
    }

    pub async fn set_view_rows(&self, view: ReportView, rows: Vec<Row>) {
        self.tables.write().await.views.insert(view, rows);
    }

    /// Social log inserts fail once the log holds `rows` entries, the way a
    /// connection dropped mid-import does.
    pub async fn fail_social_inserts_after(&self, rows: usize) {
        self.tables.write().await.social_capacity = Some(rows);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn social_log_count(&self) -> usize {
        self.tables.read().await.social.len()
    }

    fn check_online(&self) -> Result<(), DatabaseError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn rows_of(tables: &Tables, entity: Entity) -> Vec<Row> {
        tables
            .records
            .get(&entity)
            .map(|records| records.values().map(Record::to_row).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_online()
    }

    async fn find_user(&self, email: &str, password: &str) -> Result<Option<UserAccount>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| UserAccount {
                id: u.id,
                email: u.email.clone(),
            }))
    }

    async fn find_role(&self, email: &str) -> Result<Option<String>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .roles
            .iter()
            .find(|(e, _)| e == email)
            .and_then(|(_, role)| role.clone()))
    }

    async fn select_all(&self, entity: Entity) -> Result<Vec<Row>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(Self::rows_of(&tables, entity))
    }

    async fn select_by_id(&self, entity: Entity, id: i64) -> Result<Option<Row>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .get(&entity)
            .and_then(|records| records.get(&id))
            .map(Record::to_row))
    }

    async fn insert(&self, record: &Record) -> Result<(), DatabaseError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let records = tables.records.entry(record.entity()).or_default();
        if records.contains_key(&record.id()) {
            return Err(DatabaseError::Constraint(format!(
                "duplicate key value violates unique constraint on {}",
                record.entity().table()
            )));
        }
        records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &Record) -> Result<u64, DatabaseError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let records = tables.records.entry(record.entity()).or_default();
        match records.get_mut(&record.id()) {
            Some(existing) => {
                *existing = record.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, entity: Entity, id: i64) -> Result<u64, DatabaseError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let removed = tables
            .records
            .get_mut(&entity)
            .and_then(|records| records.remove(&id));
        Ok(u64::from(removed.is_some()))
    }

    async fn appointments_per_month(&self) -> Result<Vec<MonthCount>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let mut months: BTreeMap<String, i64> = BTreeMap::new();
        for row in Self::rows_of(&tables, Entity::Appointment) {
            let date = field_text(&row, "appointment_date");
            let month = date.get(..7).unwrap_or(&date).to_string();
            *months.entry(month).or_insert(0) += 1;
        }
        Ok(months
            .into_iter()
            .map(|(month, count)| MonthCount { month: Some(month), count })
            .collect())
    }

    async fn select_view(&self, view: ReportView) -> Result<Vec<Row>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.views.get(&view).cloned().unwrap_or_default())
    }

    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Row>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(Self::rows_of(&tables, Entity::Owner)
            .into_iter()
            .filter(|row| search.matches(row))
            .collect())
    }

    async fn search_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Row>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = Self::rows_of(&tables, Entity::Appointment)
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect();
        rows.sort_by_key(|row| {
            (
                field_text(row, "appointment_date"),
                field_text(row, "appointment_time"),
            )
        });
        Ok(rows)
    }

    async fn insert_social_log(&self, entry: &NewSocialLog) -> Result<(), DatabaseError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        if tables.social_capacity.is_some_and(|rows| tables.social.len() >= rows) {
            return Err(DatabaseError::Unavailable("connection lost".to_string()));
        }
        let id = tables.social.len() as i64 + 1;
        tables.social.push(SocialEntry {
            id,
            entry: entry.clone(),
            logged_at: Utc::now().naive_utc(),
        });
        Ok(())
    }

    async fn recent_social_logs(&self, limit: i64) -> Result<Vec<Row>, DatabaseError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let mut entries: Vec<&SocialEntry> = tables.social.iter().collect();
        entries.sort_by(|a, b| (b.logged_at, b.id).cmp(&(a.logged_at, a.id)));
        Ok(entries
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(SocialEntry::to_row)
            .collect())
    }
}
