// region:    --- Imports
use crate::auction::model::{Auction, AuctionStatus, ProductCondition};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// endregion: --- Imports

// region:    --- Auction Store Trait

/// 경매 조회 필터 (모든 조건은 AND 결합)
/// status 가 None 이면 상태 제한 없음
#[derive(Debug, Clone, Default)]
pub struct AuctionFilter {
    pub status: Option<AuctionStatus>,
    pub category: Option<String>,
    pub product_name: Option<String>,
}

/// 경매 저장소 트레이트
/// find_by_id 의 부재(None)는 오류가 아니라 정상 결과다.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, StoreError>;
    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError>;
    async fn update_status(&self, id: &str, status: AuctionStatus) -> Result<(), StoreError>;
    /// 만료 시각이 now 이전이거나 같은 Active 경매 조회
    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Auction>, StoreError>;
}

// endregion: --- Auction Store Trait

// region:    --- Queries

/// 경매 생성
const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (id, product_name, category, description, condition, status, timestamp, expires_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

/// 경매 조회
const FIND_AUCTION_BY_ID: &str =
    "SELECT id, product_name, category, description, condition, status, timestamp, expires_at FROM auctions WHERE id = $1";

/// 필터 조회 (NULL 파라미터는 해당 조건 생략, 상품명은 대소문자 무시 부분 일치)
const FIND_AUCTIONS: &str = r#"
    SELECT id, product_name, category, description, condition, status, timestamp, expires_at
    FROM auctions
    WHERE ($1::smallint IS NULL OR status = $1)
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR product_name ILIKE '%' || $3 || '%')
"#;

/// 경매 상태 변경
const UPDATE_AUCTION_STATUS: &str = "UPDATE auctions SET status = $2 WHERE id = $1";

/// 만료된 활성 경매 조회
const FIND_EXPIRED_AUCTIONS: &str = r#"
    SELECT id, product_name, category, description, condition, status, timestamp, expires_at
    FROM auctions
    WHERE status = 0 AND expires_at <= $1
"#;

// endregion: --- Queries

// region:    --- Postgres Store

/// 경매 레코드 (타임스탬프는 epoch 초로 보관)
#[derive(Debug, FromRow)]
struct AuctionRow {
    id: String,
    product_name: String,
    category: String,
    description: String,
    condition: i16,
    status: i16,
    timestamp: i64,
    expires_at: i64,
}

impl TryFrom<AuctionRow> for Auction {
    type Error = StoreError;

    fn try_from(row: AuctionRow) -> Result<Self, Self::Error> {
        Ok(Auction {
            condition: ProductCondition::try_from(row.condition).map_err(StoreError::Corrupt)?,
            status: AuctionStatus::try_from(row.status).map_err(StoreError::Corrupt)?,
            timestamp: epoch_to_datetime(row.timestamp)?,
            expires_at: epoch_to_datetime(row.expires_at)?,
            id: row.id,
            product_name: row.product_name,
            category: row.category,
            description: row.description,
        })
    }
}

fn epoch_to_datetime(secs: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::Corrupt(format!("epoch 범위 초과: {}", secs)))
}

/// Postgres 기반 경매 저장소
pub struct PgAuctionStore {
    pool: Arc<PgPool>,
}

impl PgAuctionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuctionStore for PgAuctionStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        sqlx::query(INSERT_AUCTION)
            .bind(&auction.id)
            .bind(&auction.product_name)
            .bind(&auction.category)
            .bind(&auction.description)
            .bind(i16::from(auction.condition))
            .bind(i16::from(auction.status))
            .bind(auction.timestamp.timestamp())
            .bind(auction.expires_at.timestamp())
            .execute(&*self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::DuplicateKey(auction.id.clone())
                }
                _ => StoreError::Database(e),
            })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        let row = sqlx::query_as::<_, AuctionRow>(FIND_AUCTION_BY_ID)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(Auction::try_from).transpose()
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        let rows = sqlx::query_as::<_, AuctionRow>(FIND_AUCTIONS)
            .bind(filter.status.map(i16::from))
            .bind(filter.category.as_deref())
            .bind(filter.product_name.as_deref())
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(Auction::try_from).collect()
    }

    async fn update_status(&self, id: &str, status: AuctionStatus) -> Result<(), StoreError> {
        sqlx::query(UPDATE_AUCTION_STATUS)
            .bind(id)
            .bind(i16::from(status))
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Auction>, StoreError> {
        let rows = sqlx::query_as::<_, AuctionRow>(FIND_EXPIRED_AUCTIONS)
            .bind(now.timestamp())
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(Auction::try_from).collect()
    }
}

// endregion: --- Postgres Store

// region:    --- Memory Store

/// 테스트용 인메모리 경매 저장소
#[derive(Default)]
pub struct MemoryAuctionStore {
    auctions: RwLock<HashMap<String, Auction>>,
}

impl MemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryAuctionStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(StoreError::DuplicateKey(auction.id.clone()));
        }
        auctions.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        Ok(self.auctions.read().await.get(id).cloned())
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        let auctions = self.auctions.read().await;
        let result = auctions
            .values()
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.category.as_deref().map_or(true, |c| a.category == c))
            .filter(|a| {
                filter.product_name.as_deref().map_or(true, |p| {
                    a.product_name.to_lowercase().contains(&p.to_lowercase())
                })
            })
            .cloned()
            .collect();
        Ok(result)
    }

    async fn update_status(&self, id: &str, status: AuctionStatus) -> Result<(), StoreError> {
        if let Some(auction) = self.auctions.write().await.get_mut(id) {
            auction.status = status;
        }
        Ok(())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Auction>, StoreError> {
        let auctions = self.auctions.read().await;
        let result = auctions
            .values()
            .filter(|a| a.status == AuctionStatus::Active && a.is_expired(now))
            .cloned()
            .collect();
        Ok(result)
    }
}

// endregion: --- Memory Store
