// region:    --- Imports
use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// endregion: --- Imports

// region:    --- User Model

/// 사용자 모델 (읽기 전용 조회만 존재, 생명주기 없음)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
}

// endregion: --- User Model

// region:    --- User Store

/// 사용자 조회
const FIND_USER_BY_ID: &str = "SELECT id, name FROM users WHERE id = $1";

/// 사용자 저장소 트레이트
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
}

/// Postgres 기반 사용자 저장소
pub struct PgUserStore {
    pool: Arc<PgPool>,
}

impl PgUserStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(FIND_USER_BY_ID)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(user)
    }
}

/// 테스트용 인메모리 사용자 저장소
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}

// endregion: --- User Store

// region:    --- Tests


// endregion: --- Tests
