use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Credentials row matched at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
}
