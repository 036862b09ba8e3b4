// handlers/public/mod.rs - Endpoints reachable without a session
//
// Login/logout plus the dashboard entry page and health probe.

pub mod auth;
pub mod system;
