// region:    --- Imports
use crate::bidding::model::Bid;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tokio::sync::RwLock;

// endregion: --- Imports

// region:    --- Bid Store Trait

/// 입찰 저장소 트레이트 (삽입과 조회만 존재, 수정/삭제 없음)
#[async_trait]
pub trait BidStore: Send + Sync {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError>;
    async fn find_by_auction_id(&self, auction_id: &str) -> Result<Vec<Bid>, StoreError>;
    /// 최고 금액 입찰 조회
    /// 동일 금액은 먼저 들어온 입찰(이른 타임스탬프, 작은 id 순)이 우선한다.
    async fn find_winning_by_auction_id(&self, auction_id: &str)
        -> Result<Option<Bid>, StoreError>;
}

// endregion: --- Bid Store Trait

// region:    --- Queries

/// 입찰 생성
const INSERT_BID: &str = r#"
    INSERT INTO bids (id, user_id, auction_id, amount, timestamp)
    VALUES ($1, $2, $3, $4, $5)
"#;

/// 경매별 입찰 조회
const FIND_BIDS_BY_AUCTION: &str =
    "SELECT id, user_id, auction_id, amount, timestamp FROM bids WHERE auction_id = $1";

/// 낙찰 입찰 조회 (최고 금액, 동률이면 이른 타임스탬프 우선)
const FIND_WINNING_BID: &str = r#"
    SELECT id, user_id, auction_id, amount, timestamp
    FROM bids
    WHERE auction_id = $1
    ORDER BY amount DESC, timestamp ASC, id ASC
    LIMIT 1
"#;

// endregion: --- Queries

// region:    --- Postgres Store

/// 입찰 레코드 (타임스탬프는 epoch 초로 보관)
#[derive(Debug, FromRow)]
struct BidRow {
    id: String,
    user_id: String,
    auction_id: String,
    amount: f64,
    timestamp: i64,
}

impl TryFrom<BidRow> for Bid {
    type Error = StoreError;

    fn try_from(row: BidRow) -> Result<Self, Self::Error> {
        let timestamp = DateTime::<Utc>::from_timestamp(row.timestamp, 0)
            .ok_or_else(|| StoreError::Corrupt(format!("epoch 범위 초과: {}", row.timestamp)))?;
        Ok(Bid {
            id: row.id,
            user_id: row.user_id,
            auction_id: row.auction_id,
            amount: row.amount,
            timestamp,
        })
    }
}

/// Postgres 기반 입찰 저장소
pub struct PgBidStore {
    pool: Arc<PgPool>,
}

impl PgBidStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BidStore for PgBidStore {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError> {
        sqlx::query(INSERT_BID)
            .bind(&bid.id)
            .bind(&bid.user_id)
            .bind(&bid.auction_id)
            .bind(bid.amount)
            .bind(bid.timestamp.timestamp())
            .execute(&*self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::DuplicateKey(bid.id.clone())
                }
                _ => StoreError::Database(e),
            })?;
        Ok(())
    }

    async fn find_by_auction_id(&self, auction_id: &str) -> Result<Vec<Bid>, StoreError> {
        let rows = sqlx::query_as::<_, BidRow>(FIND_BIDS_BY_AUCTION)
            .bind(auction_id)
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(Bid::try_from).collect()
    }

    async fn find_winning_by_auction_id(
        &self,
        auction_id: &str,
    ) -> Result<Option<Bid>, StoreError> {
        let row = sqlx::query_as::<_, BidRow>(FIND_WINNING_BID)
            .bind(auction_id)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(Bid::try_from).transpose()
    }
}

// endregion: --- Postgres Store

// region:    --- Memory Store

/// 테스트용 인메모리 입찰 저장소
#[derive(Default)]
pub struct MemoryBidStore {
    bids: RwLock<Vec<Bid>>,
}

impl MemoryBidStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BidStore for MemoryBidStore {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError> {
        let mut bids = self.bids.write().await;
        if bids.iter().any(|b| b.id == bid.id) {
            return Err(StoreError::DuplicateKey(bid.id.clone()));
        }
        bids.push(bid.clone());
        Ok(())
    }

    async fn find_by_auction_id(&self, auction_id: &str) -> Result<Vec<Bid>, StoreError> {
        let bids = self.bids.read().await;
        Ok(bids
            .iter()
            .filter(|b| b.auction_id == auction_id)
            .cloned()
            .collect())
    }

    async fn find_winning_by_auction_id(
        &self,
        auction_id: &str,
    ) -> Result<Option<Bid>, StoreError> {
        let bids = self.bids.read().await;
        let winner = bids
            .iter()
            .filter(|b| b.auction_id == auction_id)
            .min_by(|a, b| {
                // 금액 내림차순, 동률이면 타임스탬프 오름차순, 그다음 id 오름차순
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.timestamp.cmp(&b.timestamp))
                    .then(a.id.cmp(&b.id))
            })
            .cloned();
        Ok(winner)
    }
}

// endregion: --- Memory Store
