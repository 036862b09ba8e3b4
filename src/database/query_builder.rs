use serde_json::Value;
use sqlx::{self, postgres::PgArguments, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::database::models::{Entity, Record};
use crate::filter::{AppointmentFilter, FilterOrder, OwnerSearch, SqlResult, SqlValue};
use crate::types::{ReportView, Row as JsonRow};

/// Builds the parameterized statement for every gateway operation on one entity.
pub struct QueryBuilder {
    entity: Entity,
}

impl QueryBuilder {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn select_all(&self) -> SqlResult {
        let inner = format!("SELECT * FROM {}", self.entity.table());
        SqlResult::new(json_rows(&inner, ""), vec![])
    }

    pub fn select_by_id(&self, id: i64) -> SqlResult {
        let inner = format!("SELECT * FROM {} WHERE {} = $1", self.entity.table(), self.entity.primary_key());
        SqlResult::new(json_rows(&inner, ""), vec![SqlValue::Int(id)])
    }

    pub fn delete(&self, id: i64) -> SqlResult {
        SqlResult::new(
            format!("DELETE FROM {} WHERE {} = $1", self.entity.table(), self.entity.primary_key()),
            vec![SqlValue::Int(id)],
        )
    }

    /// `INSERT INTO t (pk, a, b) VALUES ($1, $2, $3)`
    pub fn insert(record: &Record) -> SqlResult {
        let fields = record.fields();
        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (_, value))| value.placeholder(i + 1))
            .collect();
        let params = fields.into_iter().map(|(_, value)| value).collect();

        SqlResult::new(
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                record.entity().table(),
                columns.join(", "),
                placeholders.join(", ")
            ),
            params,
        )
    }

    /// `UPDATE t SET a = $1, b = $2 WHERE pk = $3`; every non-key column is overwritten
    pub fn update(record: &Record) -> SqlResult {
        let mut fields = record.fields();
        let (pk_column, pk_value) = fields.remove(0);

        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (column, value))| format!("{} = {}", column, value.placeholder(i + 1)))
            .collect();
        let pk_placeholder = pk_value.placeholder(fields.len() + 1);

        let mut params: Vec<SqlValue> = fields.into_iter().map(|(_, value)| value).collect();
        params.push(pk_value);

        SqlResult::new(
            format!(
                "UPDATE {} SET {} WHERE {} = {}",
                record.entity().table(),
                assignments.join(", "),
                pk_column,
                pk_placeholder
            ),
            params,
        )
    }

    pub fn search_owners(search: &OwnerSearch) -> SqlResult {
        let (clause, params) = search.where_clause().build();
        let inner = format!("SELECT * FROM Owner WHERE {}", clause);
        SqlResult::new(json_rows(&inner, ""), params)
    }

    pub fn search_appointments(filter: &AppointmentFilter) -> SqlResult {
        let (clause, params) = filter.where_clause().build();
        let inner = format!("SELECT * FROM Appointment WHERE {}", clause);
        SqlResult::new(json_rows(&inner, &AppointmentFilter::order().generate()), params)
    }

    pub fn select_view(view: ReportView) -> SqlResult {
        let inner = format!("SELECT * FROM {}", view.relation());
        SqlResult::new(json_rows(&inner, ""), vec![])
    }

    /// Plain statement; decoded with `query_as` into `MonthCount`
    pub fn appointments_per_month() -> SqlResult {
        SqlResult::new(
            "SELECT to_char(appointment_date, 'YYYY-MM') AS month, COUNT(*)::bigint AS count \
             FROM Appointment GROUP BY 1 ORDER BY 1 ASC",
            vec![],
        )
    }

    pub fn recent_social_logs(limit: i64) -> SqlResult {
        let inner = "SELECT id, platform, title, username, logged_at FROM SocialLog";
        let tail = format!("{} LIMIT $1", FilterOrder::new().desc("logged_at").desc("id").generate());
        SqlResult::new(json_rows(inner, &tail), vec![SqlValue::Int(limit)])
    }

    pub fn insert_social_log() -> &'static str {
        "INSERT INTO SocialLog (platform, title, username) VALUES ($1, $2, $3)"
    }
}

/// `SELECT row_to_json(t) AS row FROM (<inner>) t <tail>`
///
/// Ordering and limits go in `tail` so they apply to the rows actually returned.
pub fn json_rows(inner: &str, tail: &str) -> String {
    let wrapped = format!("SELECT row_to_json(t) AS row FROM ({}) t", inner);
    if tail.is_empty() {
        wrapped
    } else {
        format!("{} {}", wrapped, tail)
    }
}

/// Run a [`json_rows`] statement and collect the objects.
pub async fn fetch_json_rows(pool: &PgPool, sql: &SqlResult) -> Result<Vec<JsonRow>, DatabaseError> {
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query(q, p);
    }
    let rows = q.fetch_all(pool).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match row.try_get::<Value, _>("row")? {
            Value::Object(map) => out.push(map),
            other => {
                return Err(DatabaseError::UnexpectedRow(format!(
                    "expected a JSON object, got {}",
                    other
                )))
            }
        }
    }
    Ok(out)
}

/// Run a write statement and return the affected row count.
pub async fn execute(pool: &PgPool, sql: &SqlResult) -> Result<u64, DatabaseError> {
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query(q, p);
    }
    let done = q.execute(pool).await?;
    Ok(done.rows_affected())
}

pub fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q SqlValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlValue::Int(i) => q.bind(*i),
        // Dates and times travel as text; the placeholder carries the cast
        SqlValue::Text(s) | SqlValue::Date(s) | SqlValue::Time(s) => q.bind(s.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Appointment, Owner};

    fn owner() -> Record {
        Record::Owner(Owner {
            owner_id: 7,
            first_name: "Ann".into(),
            last_name: "Smith".into(),
            phone: String::new(),
            email: "ann@smith.ca".into(),
            address: String::new(),
        })
    }

    #[test]
    fn select_by_id_binds_key() {
        let sql = QueryBuilder::new(Entity::Pet).select_by_id(3);
        assert_eq!(
            sql.query,
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM Pet WHERE pet_id = $1) t"
        );
        assert_eq!(sql.params, vec![SqlValue::Int(3)]);
    }

    #[test]
    fn insert_lists_key_first() {
        let sql = QueryBuilder::insert(&owner());
        assert_eq!(
            sql.query,
            "INSERT INTO Owner (owner_id, first_name, last_name, phone, email, address) VALUES ($1, $2, $3, $4, $5, $6)"
        );
        assert_eq!(sql.params[0], SqlValue::Int(7));
    }

    #[test]
    fn update_binds_key_last() {
        let sql = QueryBuilder::update(&owner());
        assert_eq!(
            sql.query,
            "UPDATE Owner SET first_name = $1, last_name = $2, phone = $3, email = $4, address = $5 WHERE owner_id = $6"
        );
        assert_eq!(sql.params.last(), Some(&SqlValue::Int(7)));
    }

    #[test]
    fn appointment_columns_are_cast() {
        let record = Record::Appointment(Appointment {
            appointment_id: 1,
            pet_id: 2,
            vet_id: 3,
            appointment_date: "2024-01-15".into(),
            appointment_time: "09:30".into(),
            reason: "checkup".into(),
            status: "booked".into(),
        });
        let sql = QueryBuilder::update(&record);
        assert!(sql.query.contains("appointment_date = $3::date"));
        assert!(sql.query.contains("appointment_time = $4::time"));
        assert!(sql.query.ends_with("WHERE appointment_id = $7"));
    }

    #[test]
    fn appointment_search_is_ordered() {
        let sql = QueryBuilder::search_appointments(&AppointmentFilter::default());
        assert_eq!(
            sql.query,
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM Appointment WHERE 1=1) t \
             ORDER BY appointment_date ASC, appointment_time ASC"
        );
    }

    #[test]
    fn social_logs_are_limited_after_ordering() {
        let sql = QueryBuilder::recent_social_logs(50);
        assert!(sql.query.ends_with(") t ORDER BY logged_at DESC, id DESC LIMIT $1"));
        assert_eq!(sql.params, vec![SqlValue::Int(50)]);
    }

    #[test]
    fn views_select_from_relation() {
        let sql = QueryBuilder::select_view(ReportView::TopCostVets);
        assert_eq!(sql.query, "SELECT row_to_json(t) AS row FROM (SELECT * FROM TopCostVets) t");
    }
}
