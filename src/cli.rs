use clap::Parser;

use crate::config::AppConfig;

/// Server flags; each overrides the matching environment setting.
#[derive(Debug, Parser)]
#[command(name = "petcare-api")]
#[command(about = "PetCare Plus API - owners, pets, appointments and reports over HTTP")]
#[command(version)]
pub struct ServerArgs {
    #[arg(long, env = "PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(long, env = "STATIC_DIR", help = "Directory holding the dashboard assets")]
    pub static_dir: Option<String>,
}

impl ServerArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = dir.clone();
        }
    }
}
