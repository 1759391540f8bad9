// region:    --- Imports
use crate::auction::manager::AuctionManager;
use crate::auction::model::AuctionStatus;
use crate::auction::store::AuctionStore;
use crate::bidding::model::Bid;
use crate::bidding::store::BidStore;
use crate::error::Error;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Bid Service

/// 입찰 서비스
/// 입찰 저장 전 경매 매니저를 통해 경매가 열려 있는지 검증한다.
///
/// 검증과 저장은 두 저장소에 걸친 원자적 연산이 아니다. 검증 직후
/// 스윕이 해당 경매를 종료하면 논리적으로 닫힌 경매에 입찰이 남을 수
/// 있으며, 이는 허용된 최종 일관성 공백이다.
pub struct BidService<A: AuctionStore, B: BidStore> {
    auction_manager: Arc<AuctionManager<A>>,
    bid_store: B,
}

impl<A: AuctionStore, B: BidStore> BidService<A, B> {
    pub fn new(auction_manager: Arc<AuctionManager<A>>, bid_store: B) -> Self {
        Self {
            auction_manager,
            bid_store,
        }
    }

    /// 입찰 생성
    /// 1. 경매 존재 확인 (없으면 도메인 오류)
    /// 2. 경매 상태가 Active 인지 확인
    /// 3. 만료 시각이 지나지 않았는지 재확인 (스윕 지연 대비 의도된 이중 검사)
    /// 4. 통과하면 입찰 저장
    pub async fn place_bid(
        &self,
        user_id: &str,
        auction_id: &str,
        amount: f64,
    ) -> Result<Bid, Error> {
        let bid = Bid::new(user_id, auction_id, amount);

        let auction = self
            .auction_manager
            .find_by_id(auction_id)
            .await?
            .ok_or(Error::AuctionNotFound)?;

        if auction.status != AuctionStatus::Active {
            debug!(
                "{:<12} --> 입찰 거절 (비활성 경매): {}",
                "Bid", auction_id
            );
            return Err(Error::AuctionNotActive);
        }

        if auction.is_expired(Utc::now()) {
            debug!(
                "{:<12} --> 입찰 거절 (만료된 경매): {}",
                "Bid", auction_id
            );
            return Err(Error::AuctionExpired);
        }

        self.bid_store.insert(&bid).await?;

        info!(
            "{:<12} --> 입찰 생성 완료: {} (경매: {})",
            "Bid", bid.id, bid.auction_id
        );
        Ok(bid)
    }

    /// 경매별 입찰 전체 조회 (순서 보장 없음)
    pub async fn find_by_auction(&self, auction_id: &str) -> Result<Vec<Bid>, Error> {
        Ok(self.bid_store.find_by_auction_id(auction_id).await?)
    }

    /// 낙찰 입찰 조회 (최고 금액, 입찰이 없으면 None)
    pub async fn find_winning_bid(&self, auction_id: &str) -> Result<Option<Bid>, Error> {
        Ok(self
            .bid_store
            .find_winning_by_auction_id(auction_id)
            .await?)
    }
}

// endregion: --- Bid Service
