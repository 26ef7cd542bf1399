use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hash: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("username or email already registered")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> StoreResult<DbUser>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<DbUser>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<DbUser>>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<DbUser> {
        let created = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (id, username, email, hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate =
                matches!(&e, sqlx::Error::Database(db_err) if db_err.is_unique_violation());
            if duplicate {
                StoreError::Duplicate
            } else {
                StoreError::Database(e)
            }
        })?;
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, email, hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, email, hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<DbUser>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<DbUser> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Duplicate);
        }
        let created = DbUser {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            hash: user.hash,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<DbUser>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<DbUser>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryUserStore::new();
        let created = store.create_user(new_user("sam", "sam@example.com")).await.unwrap();

        let by_email = store.find_user_by_email("sam@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        let by_id = store.find_user_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "sam");
        assert!(store.find_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicates() {
        let store = MemoryUserStore::new();
        store.create_user(new_user("sam", "sam@example.com")).await.unwrap();

        let same_email = store.create_user(new_user("other", "sam@example.com")).await;
        assert!(matches!(same_email, Err(StoreError::Duplicate)));
        let same_name = store.create_user(new_user("sam", "new@example.com")).await;
        assert!(matches!(same_name, Err(StoreError::Duplicate)));
    }
}
