use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::models::{Client, NewClient};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage port for client records.
///
/// `PgStore` is the production backend; `MemoryStore` backs the test suite.
/// The trait is async to accommodate the Postgres pool; the in-memory
/// implementation is lock-based and never blocks for long.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, client: NewClient) -> Result<Client>;

    /// Every record, in natural scan order.
    async fn find_all(&self) -> Result<Vec<Client>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>>;

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>>;

    /// Overwrite every mutable field of an existing record.
    async fn update(&self, client: &Client) -> Result<()>;

    async fn delete(&self, id: i64) -> Result<()>;
}

/// Initialize the relational backend from configuration
pub async fn init(config: &Config) -> Result<PgStore> {
    let store = PgStore::connect(config.database_url()).await?;
    Ok(store)
}
