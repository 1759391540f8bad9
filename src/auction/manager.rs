// region:    --- Imports
use crate::auction::model::{Auction, AuctionStatus, ProductCondition};
use crate::auction::store::{AuctionFilter, AuctionStore};
use crate::error::Error;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Auction Manager

/// 경매 생성 입력
#[derive(Debug, Clone)]
pub struct NewAuction {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

/// 경매 생명주기 매니저
///
/// 경매 저장소를 단일 읽기/쓰기 잠금 아래에서만 접근한다.
/// 변경(생성, 상태 변경, 스윕 종료)은 배타 잠금, 조회는 공유 잠금.
/// 잠금은 저장소 전체 단위의 거친 잠금이며, 생성 시점에 주입된다.
pub struct AuctionManager<S: AuctionStore> {
    store: Arc<RwLock<S>>,
    duration: Duration,
}

impl<S: AuctionStore> AuctionManager<S> {
    /// duration 은 경매 진행 시간 (만료 시각 = 생성 시각 + duration)
    pub fn new(store: Arc<RwLock<S>>, duration: Duration) -> Self {
        Self { store, duration }
    }

    /// 경매 생성: 새 식별자 발급, 상태 Active, 만료 시각 계산 후 저장
    pub async fn create(&self, input: NewAuction) -> Result<Auction, Error> {
        let auction = Auction::new(
            input.product_name,
            input.category,
            input.description,
            input.condition,
            self.duration,
        );

        let store = self.store.write().await;
        store.insert(&auction).await?;

        info!(
            "{:<12} --> 경매 생성 완료: {}, 만료 시각: {}",
            "Auction",
            auction.id,
            auction.expires_at.to_rfc3339()
        );
        Ok(auction)
    }

    /// 경매 단건 조회 (부재는 None, 저장소 실패만 오류)
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Auction>, Error> {
        debug!("{:<12} --> 경매 조회 id: {}", "Auction", id);
        let store = self.store.read().await;
        Ok(store.find_by_id(id).await?)
    }

    /// 필터 조회 (정렬 순서는 보장하지 않는다)
    pub async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, Error> {
        debug!("{:<12} --> 경매 필터 조회: {:?}", "Auction", filter);
        let store = self.store.read().await;
        Ok(store.find(filter).await?)
    }

    /// 경매 상태 변경
    /// 완료된 경매를 다시 활성화하는 역방향 전이는 거부한다.
    pub async fn update_status(&self, id: &str, status: AuctionStatus) -> Result<(), Error> {
        let store = self.store.write().await;

        let auction = store
            .find_by_id(id)
            .await?
            .ok_or(Error::AuctionNotFound)?;
        if auction.status == AuctionStatus::Completed && status == AuctionStatus::Active {
            return Err(Error::InvalidStatusTransition);
        }

        store.update_status(id, status).await?;
        info!(
            "{:<12} --> 경매 상태 변경: {} -> {:?}",
            "Auction", id, status
        );
        Ok(())
    }

    /// 만료 시각이 지난 Active 경매 조회
    pub async fn find_expired(&self) -> Result<Vec<Auction>, Error> {
        let store = self.store.read().await;
        Ok(store.find_expired(Utc::now()).await?)
    }

    /// 스윕 1회 수행: 만료된 활성 경매를 모두 Completed 로 전환
    /// 개별 레코드 갱신 실패는 로그만 남기고 계속 진행한다.
    /// 반환값은 종료된 경매 수.
    pub async fn close_expired(&self) -> Result<usize, Error> {
        let store = self.store.write().await;

        let expired = store.find_expired(Utc::now()).await?;
        let mut closed = 0;

        for auction in &expired {
            match store
                .update_status(&auction.id, AuctionStatus::Completed)
                .await
            {
                Ok(()) => {
                    closed += 1;
                    info!(
                        "{:<12} --> 경매 자동 종료: {} (만료 시각: {})",
                        "Sweeper",
                        auction.id,
                        auction.expires_at.to_rfc3339()
                    );
                }
                Err(e) => {
                    error!(
                        "{:<12} --> 경매 {} 상태 갱신 실패: {:?}",
                        "Sweeper", auction.id, e
                    );
                }
            }
        }

        if closed > 0 {
            info!("{:<12} --> 만료된 경매 {}건 종료", "Sweeper", closed);
        }
        Ok(closed)
    }
}

// endregion: --- Auction Manager
