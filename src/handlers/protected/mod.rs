// handlers/protected/mod.rs - Endpoints behind the session cookie
//
// Every route here is wrapped by `require_login` or `require_admin` in the route
// table; handlers receive the caller as `Extension<Identity>`.

pub mod export;
pub mod records;
pub mod reports;
pub mod search;
pub mod social;
