use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where user records live, selected with `STORAGE_BACKEND`
#[derive(Clone, Debug)]
pub enum StorageBackend {
    /// Default; reads `DATABASE_URL` and the `DB_*` pool settings
    Postgres(PostgresConfig),
    /// Process-local store, lost on restart
    Memory,
}

impl FromEnv for StorageBackend {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("STORAGE_BACKEND", "postgres");

        match backend.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres(PostgresConfig::from_env()?)),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::ParseError {
                key: "STORAGE_BACKEND".to_string(),
                details: format!("expected 'postgres' or 'memory', got '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: StorageBackend,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let storage = StorageBackend::from_env()?;
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 unless set

        Ok(Self {
            app: app_info!(),
            storage,
            server,
            environment,
        })
    }
}
