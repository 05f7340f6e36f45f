#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Where posts and authors are stored, and how large the pool may grow.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Read `DATABASE_URL` and the `DB_*_CONNECTIONS` pool bounds.
    ///
    /// `None` when no URL is set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let bound = |key: &str, fallback: u32| {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(fallback)
        };

        Some(Self {
            url,
            max_connections: bound("DB_MAX_CONNECTIONS", 20),
            min_connections: bound("DB_MIN_CONNECTIONS", 2),
        })
    }

    /// Open the pool.
    #[cfg(feature = "postgres")]
    pub async fn connect(&self) -> Result<DbConn, DbErr> {
        tracing::info!(
            max = self.max_connections,
            min = self.min_connections,
            "Opening post store pool"
        );

        let mut options = ConnectOptions::new(&self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true);

        Database::connect(options).await
    }
}
