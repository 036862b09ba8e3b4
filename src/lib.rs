pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod csv;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod social;
pub mod types;
pub mod validation;

pub use app::AppState;
pub use routes::router;
