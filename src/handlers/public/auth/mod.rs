// handlers/public/auth/mod.rs - Session acquisition and release

pub mod login;
pub mod logout;

pub use login::login_post;
pub use logout::logout_post;
