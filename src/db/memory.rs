use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ClientStore;
use crate::models::{Client, NewClient};

/// In-process backend used by the test suite.
///
/// Ids are handed out by an atomic counter and never reused, matching the
/// relational backend's serial column.
pub struct MemoryStore {
    clients: RwLock<HashMap<i64, Client>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn insert(&self, client: NewClient) -> Result<Client> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let client = Client {
            id,
            name: client.name,
            email: client.email,
            cpf: client.cpf,
            phone: client.phone,
            photo_url: client.photo_url,
        };
        self.clients.write().await.insert(id, client.clone());

        Ok(client)
    }

    async fn find_all(&self) -> Result<Vec<Client>> {
        let mut clients: Vec<Client> = self.clients.read().await.values().cloned().collect();
        clients.sort_by_key(|c| c.id);

        Ok(clients)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>> {
        Ok(self.clients.read().await.get(&id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|c| c.cpf == cpf)
            .cloned())
    }

    async fn update(&self, client: &Client) -> Result<()> {
        let mut clients = self.clients.write().await;
        match clients.get_mut(&client.id) {
            Some(slot) => {
                *slot = client.clone();
                Ok(())
            }
            None => bail!("no client with id {} to update", client.id),
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.clients.write().await.remove(&id);
        Ok(())
    }
}
