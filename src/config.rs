use std::path::PathBuf;

use actix_web::cookie::Key;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub session_dir: PathBuf,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        // Some deployment targets mount the project directory read-only;
        // EPHEMERAL_FS relocates all writable state under the OS temp dir.
        let ephemeral = std::env::var("EPHEMERAL_FS")
            .map(|v| v == "true")
            .unwrap_or(false);
        let data_dir = if ephemeral {
            std::env::temp_dir().join("school-portal")
        } else {
            PathBuf::from("data")
        };

        let session_dir = std::env::var("SESSION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("sessions"));

        let seed_demo = std::env::var("SEED_DEMO")
            .map(|v| v == "true")
            .unwrap_or(false);

        Config { port, data_dir, session_dir, seed_demo }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("school.db")
    }

    /// Cookie signing key from SESSION_SECRET (64+ bytes). Falls back to a
    /// random key, which invalidates existing sessions on restart.
    pub fn session_key(&self) -> Key {
        match std::env::var("SESSION_SECRET") {
            Ok(val) if val.len() >= 64 => {
                log::info!("Using SESSION_SECRET from environment");
                Key::from(val.as_bytes())
            }
            Ok(val) => {
                log::warn!(
                    "SESSION_SECRET too short ({} bytes, need 64+) — generating random key",
                    val.len()
                );
                Key::generate()
            }
            Err(_) => {
                log::warn!("No SESSION_SECRET set — generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
