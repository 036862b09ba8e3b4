use super::types::{FilterOp, SqlValue};

/// Composes a WHERE clause from the conditions actually supplied.
///
/// Placeholders are numbered in push order starting at `$1`.
#[derive(Debug, Default)]
pub struct FilterWhere {
    conditions: Vec<String>,
    params: Vec<SqlValue>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column op $n`
    pub fn push(&mut self, column: &str, op: FilterOp, value: SqlValue) -> &mut Self {
        let placeholder = self.bind(value);
        self.conditions.push(format!("{} {} {}", column, op.to_sql(), placeholder));
        self
    }

    /// `(a op $n OR b op $n+1 ...)`, one parameter per column
    pub fn push_any(&mut self, columns: &[&str], op: FilterOp, value: SqlValue) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        let parts: Vec<String> = columns
            .iter()
            .map(|column| {
                let placeholder = self.bind(value.clone());
                format!("{} {} {}", column, op.to_sql(), placeholder)
            })
            .collect();
        self.conditions.push(format!("({})", parts.join(" OR ")));
        self
    }

    /// Clause text (`1=1` when nothing was pushed) and its parameters
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let clause = if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        };
        (clause, self.params)
    }

    fn bind(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        let index = self.params.len();
        self.params[index - 1].placeholder(index)
    }
}
