pub mod auth;
pub mod body;
pub mod extract;
pub mod response;

pub use auth::{require_admin, require_login};
pub use body::JsonBody;
pub use extract::QueryParams;
pub use response::ApiResponse;
