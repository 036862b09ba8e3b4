use serde_json::Value;

/// A bound query parameter. Dates and times are sent as text and cast in SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    Date(String),
    Time(String),
}

impl SqlValue {
    /// Cast suffix appended to the placeholder
    pub fn cast(&self) -> &'static str {
        match self {
            SqlValue::Int(_) | SqlValue::Text(_) => "",
            SqlValue::Date(_) => "::date",
            SqlValue::Time(_) => "::time",
        }
    }

    /// `$n` placeholder with the cast for this value
    pub fn placeholder(&self, index: usize) -> String {
        format!("${}{}", index, self.cast())
    }

    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Int(i) => Value::from(*i),
            SqlValue::Text(s) | SqlValue::Date(s) | SqlValue::Time(s) => Value::String(s.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
    ILike,
}

impl FilterOp {
    pub fn to_sql(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::ILike => "ILIKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

impl SqlResult {
    pub fn new(query: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }
}
