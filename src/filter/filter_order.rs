use super::types::SortDirection;

/// `ORDER BY` clause built from fixed column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOrder {
    columns: Vec<(&'static str, SortDirection)>,
}

impl FilterOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(mut self, column: &'static str) -> Self {
        self.columns.push((column, SortDirection::Asc));
        self
    }

    pub fn desc(mut self, column: &'static str) -> Self {
        self.columns.push((column, SortDirection::Desc));
        self
    }

    /// Empty string when no column was added
    pub fn generate(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .columns
            .iter()
            .map(|(column, sort)| format!("{} {}", column, sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
