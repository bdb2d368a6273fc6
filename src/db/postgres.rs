use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::ClientStore;
use crate::models::{Client, NewClient};

/// Relational backend over a Postgres connection pool
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect with a connection pool and apply the bootstrap migration
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ClientStore for PgStore {
    async fn insert(&self, client: NewClient) -> Result<Client> {
        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, cpf, phone, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, cpf, phone, photo_url
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.cpf)
        .bind(&client.phone)
        .bind(&client.photo_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, cpf, phone, photo_url FROM clients ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, cpf, phone, photo_url FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, cpf, phone, photo_url FROM clients WHERE cpf = $1",
        )
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn update(&self, client: &Client) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE clients
            SET name = $1, email = $2, cpf = $3, phone = $4, photo_url = $5
            WHERE id = $6
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.cpf)
        .bind(&client.phone)
        .bind(&client.photo_url)
        .bind(client.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
