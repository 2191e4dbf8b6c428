//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory that static assets are served from.
    pub content_root: PathBuf,
    /// Sub-directory of `content_root` holding menu item images.
    pub image_dir: String,
    pub max_upload_bytes: u64,
    pub serve_static: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `config/default`, `config/{APP_ENV}` and `__`-separated environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .set_default("app.env", env.clone())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        Self::from_config(config)
    }

    /// Builder pre-populated with every default, so only `database.url` has to be supplied.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", DEFAULT_HOST)?
            .set_default("app.port", i64::from(DEFAULT_PORT))?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("database.max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default("database.min_connections", i64::from(DEFAULT_MIN_CONNECTIONS))?
            .set_default("database.acquire_timeout_seconds", DEFAULT_ACQUIRE_TIMEOUT_SECONDS as i64)?
            .set_default("database.run_migrations", true)?
            .set_default("storage.content_root", DEFAULT_CONTENT_ROOT)?
            .set_default("storage.image_dir", DEFAULT_IMAGE_DIR)?
            .set_default("storage.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as i64)?
            .set_default("storage.serve_static", true)?
            .set_default("logging.format", "json")
    }

    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let parsed: AppConfig = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::InvalidConfig("database.url must be set".into()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidConfig(
                "database.min_connections exceeds database.max_connections".into(),
            ));
        }
        let image_dir = self.storage.image_dir.trim_matches('/');
        if image_dir.is_empty() || image_dir.contains("..") {
            return Err(AppError::InvalidConfig(format!(
                "storage.image_dir is not a valid directory name: {:?}",
                self.storage.image_dir
            )));
        }
        if self.storage.max_upload_bytes == 0 {
            return Err(AppError::InvalidConfig("storage.max_upload_bytes must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn build(toml: &str) -> Result<AppConfig, AppError> {
        let config = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        AppConfig::from_config(config)
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = build("[database]\nurl = \"postgres://localhost/mango\"").unwrap();
        assert_eq!(cfg.app.port, DEFAULT_PORT);
        assert_eq!(cfg.storage.image_dir, "Images");
        assert_eq!(cfg.storage.content_root, PathBuf::from("wwwroot"));
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert!(cfg.logging.directory.is_none());
        assert!(cfg.database.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let cfg = build(
            r#"
            [app]
            port = 9000
            [database]
            url = "postgres://db/mango"
            max_connections = 4
            [storage]
            image_dir = "uploads"
            serve_static = false
            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.app.port, 9000);
        assert_eq!(cfg.database.max_connections, 4);
        assert_eq!(cfg.storage.image_dir, "uploads");
        assert!(!cfg.storage.serve_static);
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_database_url_rejected() {
        assert!(build("").is_err());
        assert!(matches!(
            build("[database]\nurl = \"  \""),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_image_dir_traversal_rejected() {
        let result = build("[database]\nurl = \"postgres://x\"\n[storage]\nimage_dir = \"../etc\"");
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }
}
