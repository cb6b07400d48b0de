use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::user::User;
use crate::database::repositories::UserStore;
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    ids_by_username: HashMap<String, i64>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        if inner.ids_by_username.contains_key(username) {
            return Err(AppError::Conflict("username already exists".into()));
        }

        let id = inner.last_id + 1;
        let now = Utc::now();
        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.last_id = id;
        inner.ids_by_username.insert(user.username.clone(), id);
        inner.users.insert(id, user.clone());

        tracing::info!("Created user: {}", id);
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .ids_by_username
            .get(username)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }
}
