//! Server settings loaded via OrthoConfig and the runtime configuration
//! derived from them.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tender_backend::outbound::memory::MemorySeed;
use tender_backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Values controlling the listener and the storage backend.
///
/// Every field can be set by CLI flag, `TENDER_*` environment variable or
/// configuration file.
///
/// Without `database_url` the server keeps all state in memory and loses it
/// on restart. That mode is meant for local development: the user directory
/// starts empty, so identity-bearing requests fail with 401 unless
/// `seed_file` names a [`MemorySeed`] document.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TENDER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_address: Option<String>,
    /// PostgreSQL connection URL. In-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// JSON [`MemorySeed`] loaded into the in-memory store. Ignored when a
    /// database is configured.
    pub seed_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    /// Return the configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Runtime configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_address: String,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) memory_seed: Option<MemorySeed>,
}

impl ServerConfig {
    /// Construct a configuration listening on `bind_address` with in-memory
    /// stores.
    #[must_use]
    pub fn new(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
            db_pool: None,
            memory_seed: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the in-memory store used when no pool is attached.
    #[must_use]
    pub fn with_memory_seed(mut self, seed: MemorySeed) -> Self {
        self.memory_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "TENDER_BIND_ADDRESS",
        "TENDER_DATABASE_URL",
        "TENDER_POOL_MAX_SIZE",
        "TENDER_RUN_MIGRATIONS",
        "TENDER_SEED_FILE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("tender-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert!(settings.database_url().is_none());
        assert!(settings.run_migrations);
        assert!(settings.seed_file.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TENDER_BIND_ADDRESS", Some("127.0.0.1:9000".to_owned())),
            (
                "TENDER_DATABASE_URL",
                Some("postgres://localhost/tender".to_owned()),
            ),
            ("TENDER_POOL_MAX_SIZE", Some("4".to_owned())),
            ("TENDER_RUN_MIGRATIONS", Some("false".to_owned())),
            ("TENDER_SEED_FILE", Some("/etc/tender/seed.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), "127.0.0.1:9000");
        assert_eq!(settings.database_url(), Some("postgres://localhost/tender"));
        assert_eq!(settings.pool_max_size(), 4);
        assert!(!settings.run_migrations);
        assert_eq!(
            settings.seed_file,
            Some(PathBuf::from("/etc/tender/seed.json"))
        );
    }

    #[rstest]
    fn blank_database_url_means_memory() {
        let _guard = lock_env([("TENDER_DATABASE_URL", Some("  ".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(settings.database_url().is_none());
    }
}
