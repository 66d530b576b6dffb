//! Store creation and utility functions.

use std::path::PathBuf;
use std::sync::Arc;

use sortable::{
    config::SortableConfig,
    constants::{IN_MEMORY_FILE, SQLITE_FILE},
    store::{InMemoryStore, RecordStore},
};

use crate::cli::{Backend, StoreArgs};

/// An opened store and where to persist it, if the backend needs that.
pub struct OpenStore {
    pub store: Arc<dyn RecordStore>,
    json_path: Option<PathBuf>,
}

impl OpenStore {
    /// Write in-memory state back to its JSON file; SQL backends commit as
    /// they go.
    pub fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(path) = &self.json_path else {
            return Ok(());
        };
        if let Some(in_memory) = self.store.as_any().downcast_ref::<InMemoryStore>() {
            in_memory.save_to_file(path)?;
            tracing::info!("Saved data to {}", path.display());
        }
        Ok(())
    }
}

/// Redact credentials from a PostgreSQL connection URL for safe logging
pub fn redact_postgres_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut redacted = parsed.clone();
        if !parsed.username().is_empty() {
            let _ = redacted.set_username("***");
        }
        if parsed.password().is_some() {
            let _ = redacted.set_password(Some("***"));
        }
        redacted.to_string()
    } else {
        "postgres://***@<unparsable-url>".to_string()
    }
}

/// Human-readable description of the configured backend
pub fn backend_label(args: &StoreArgs) -> String {
    match args.backend {
        Backend::Sqlite => "sqlite".to_string(),
        Backend::Postgres => match &args.postgres_url {
            Some(url) => format!("postgres ({})", redact_postgres_url(url)),
            None => "postgres".to_string(),
        },
        Backend::Inmemory => "inmemory".to_string(),
    }
}

/// Create the appropriate store based on configuration
///
/// SQL stores get a table for every table of `config`.
pub fn open_store(
    args: &StoreArgs,
    config: &SortableConfig,
) -> Result<OpenStore, Box<dyn std::error::Error>> {
    let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    // Ensure data directory exists
    std::fs::create_dir_all(&data_dir)?;

    match args.backend {
        Backend::Sqlite => {
            #[cfg(feature = "sqlite")]
            {
                let db_path = data_dir.join(SQLITE_FILE);
                tracing::info!("Using SQLite store at {}", db_path.display());
                let store = sortable::store::SqlxStore::open_sqlite(&db_path)?;
                for schema in config.schemas() {
                    store.register_table(schema)?;
                }
                Ok(OpenStore {
                    store: Arc::new(store),
                    json_path: None,
                })
            }
            #[cfg(not(feature = "sqlite"))]
            {
                let _ = config;
                Err("SQLite backend requires the 'sqlite' feature".into())
            }
        }
        Backend::Postgres => {
            let url = args
                .postgres_url
                .as_ref()
                .ok_or("PostgreSQL backend requires --postgres-url or SORTABLE_POSTGRES_URL")?;

            let display_url = redact_postgres_url(url);
            tracing::info!("Connecting to PostgreSQL store at {}", display_url);

            #[cfg(feature = "postgres")]
            {
                let store = sortable::store::SqlxStore::connect_postgres(url).map_err(|e| {
                    format!("Failed to connect to PostgreSQL at {}: {}", display_url, e)
                })?;
                tracing::info!("Connected to PostgreSQL successfully");
                for schema in config.schemas() {
                    store.register_table(schema)?;
                }
                Ok(OpenStore {
                    store: Arc::new(store),
                    json_path: None,
                })
            }
            #[cfg(not(feature = "postgres"))]
            {
                let _ = config;
                Err("PostgreSQL backend requires the 'postgres' feature".into())
            }
        }
        Backend::Inmemory => {
            let json_path = data_dir.join(IN_MEMORY_FILE);
            tracing::info!(
                "Using in-memory store with persistence at {}",
                json_path.display()
            );
            let store = InMemoryStore::load_from_file(&json_path)?;
            Ok(OpenStore {
                store: Arc::new(store),
                json_path: Some(json_path),
            })
        }
    }
}
