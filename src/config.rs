use std::env;
use std::path::PathBuf;

/// Runtime settings, read once at startup. Every knob has a development
/// default except the session key, which `main` refuses to run without.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub qr_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://printdesk.db".to_owned()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "static/uploads".to_owned())
                .into(),
            qr_dir: env::var("QR_DIR").unwrap_or_else(|_| "static/qr".to_owned()).into(),
        }
    }
}
