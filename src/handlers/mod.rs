// handlers/mod.rs - Two access tiers
//
// Public (no session) → Protected (session cookie, role-gated per route)

pub mod protected;
pub mod public;

use crate::database::DatabaseError;
use crate::error::ApiError;

/// Log a gateway failure with the route that hit it and answer `Database error`.
pub(crate) fn db_error(route: &str) -> impl FnOnce(DatabaseError) -> ApiError + '_ {
    move |err| {
        tracing::error!("DB error in {}: {}", route, err);
        ApiError::database_error()
    }
}
