//! Search filters: SQL composition for the gateway plus row matching for
//! in-process stores.

pub mod filter_order;
pub mod filter_where;
pub mod types;

pub use filter_order::FilterOrder;
pub use filter_where::FilterWhere;
pub use types::{FilterOp, SortDirection, SqlResult, SqlValue};

use serde::Deserialize;
use serde_json::Value;

use crate::types::Row;

/// Query string of `GET /api/appointments/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentSearchQuery {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Conjunctive appointment filter. Empty parameters are treated as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl AppointmentFilter {
    /// Results come back by date, then time
    pub fn order() -> FilterOrder {
        FilterOrder::new().asc("appointment_date").asc("appointment_time")
    }

    pub fn from_query(query: AppointmentSearchQuery) -> Self {
        fn supplied(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            status: supplied(query.status),
            from: supplied(query.from),
            to: supplied(query.to),
        }
    }

    pub fn where_clause(&self) -> FilterWhere {
        let mut filter = FilterWhere::new();
        if let Some(status) = &self.status {
            filter.push("status", FilterOp::Eq, SqlValue::Text(status.clone()));
        }
        if let Some(from) = &self.from {
            filter.push("appointment_date", FilterOp::Gte, SqlValue::Date(from.clone()));
        }
        if let Some(to) = &self.to {
            filter.push("appointment_date", FilterOp::Lte, SqlValue::Date(to.clone()));
        }
        filter
    }

    pub fn matches(&self, row: &Row) -> bool {
        if let Some(status) = &self.status {
            if field_text(row, "status") != *status {
                return false;
            }
        }
        let date = field_text(row, "appointment_date");
        let day = day_part(&date);
        if let Some(from) = &self.from {
            if day < day_part(from) {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if day > day_part(to) {
                return false;
            }
        }
        true
    }
}

/// Owner name/email search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSearch {
    term: String,
}

impl OwnerSearch {
    pub const COLUMNS: [&'static str; 3] = ["first_name", "last_name", "email"];

    /// `None` for a blank query; callers answer with an empty list.
    pub fn new(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            None
        } else {
            Some(Self { term: term.to_string() })
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// `%term%` with LIKE wildcards in the term escaped
    pub fn like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.term.len() + 2);
        escaped.push('%');
        for c in self.term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }

    pub fn where_clause(&self) -> FilterWhere {
        let mut filter = FilterWhere::new();
        filter.push_any(&Self::COLUMNS, FilterOp::ILike, SqlValue::Text(self.like_pattern()));
        filter
    }

    pub fn matches(&self, row: &Row) -> bool {
        let needle = self.term.to_lowercase();
        Self::COLUMNS
            .iter()
            .any(|column| field_text(row, column).to_lowercase().contains(&needle))
    }
}

/// Text form of a row field; null or missing is empty
pub fn field_text(row: &Row, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn day_part(date: &str) -> &str {
    date.get(..10).unwrap_or(date)
}
