use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row to append to `SocialLog`; `logged_at` is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialLog {
    pub platform: String,
    pub title: String,
    pub username: String,
}

/// Appointments counted per calendar month (`YYYY-MM`). Rows without a date
/// are counted under a null month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MonthCount {
    pub month: Option<String>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn undated_appointments_serialize_as_null_month() {
        let counts = vec![
            MonthCount { month: Some("2024-01".into()), count: 3 },
            MonthCount { month: None, count: 1 },
        ];
        assert_eq!(
            serde_json::to_value(&counts).unwrap(),
            json!([{ "month": "2024-01", "count": 3 }, { "month": null, "count": 1 }])
        );
    }
}
