//! Configuration for the downstream memory backend.
//!
//! Build a [`MemoryBackendConfig`] once at process start and pass it to
//! whatever constructs the backend client. It is never re-read: changed
//! environment variables take effect on restart.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, VnDatesError};

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "jarvis";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSection<C> {
    pub provider: String,
    pub config: C,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedderConfig {
    pub model: String,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct VectorStoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub collection_name: String,
    pub embedding_model_dims: u32,
}

impl fmt::Debug for VectorStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorStoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dbname", &self.dbname)
            .field("collection_name", &self.collection_name)
            .field("embedding_model_dims", &self.embedding_model_dims)
            .finish()
    }
}

/// Backend settings, serialized in the shape the backend's config loader expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryBackendConfig {
    pub llm: ProviderSection<LlmConfig>,
    pub embedder: ProviderSection<EmbedderConfig>,
    pub vector_store: ProviderSection<VectorStoreConfig>,
    pub version: String,
}

impl MemoryBackendConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` from
    /// the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`VnDatesError::InvalidConfig`] when `DB_PORT` is not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("DB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                VnDatesError::InvalidConfig(format!("DB_PORT '{}': {}", raw, e))
            })?,
            None => DEFAULT_DB_PORT,
        };

        let config = Self {
            llm: ProviderSection {
                provider: "gemini".into(),
                config: LlmConfig {
                    model: "gemini-2.5-flash-lite".into(),
                    temperature: 0.1,
                    max_tokens: 2000,
                },
            },
            embedder: ProviderSection {
                provider: "gemini".into(),
                config: EmbedderConfig {
                    model: "gemini-embedding-001".into(),
                },
            },
            vector_store: ProviderSection {
                provider: "pgvector".into(),
                config: VectorStoreConfig {
                    host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into()),
                    port,
                    user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.into()),
                    password: lookup("DB_PASSWORD"),
                    dbname: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.into()),
                    collection_name: "memories".into(),
                    embedding_model_dims: 1536,
                },
            },
            version: "v1.1".into(),
        };
        tracing::debug!(
            host = %config.vector_store.config.host,
            port = config.vector_store.config.port,
            dbname = %config.vector_store.config.dbname,
            "memory backend config built"
        );
        Ok(config)
    }

    /// A copy safe to print: the database password is replaced.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.vector_store.config.password.is_some() {
            copy.vector_store.config.password = Some("<redacted>".into());
        }
        copy
    }
}
