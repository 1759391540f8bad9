use auction_house::auction::manager::{AuctionManager, NewAuction};
use auction_house::auction::model::{Auction, AuctionStatus, ProductCondition};
use auction_house::auction::store::{AuctionStore, MemoryAuctionStore};
use auction_house::bidding::model::Bid;
use auction_house::bidding::service::BidService;
use auction_house::bidding::store::{BidStore, MemoryBidStore};
use auction_house::error::Error;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

type TestBidService = BidService<MemoryAuctionStore, MemoryBidStore>;

/// 테스트용 입찰 서비스 생성
fn setup() -> (
    TestBidService,
    Arc<AuctionManager<MemoryAuctionStore>>,
    Arc<RwLock<MemoryAuctionStore>>,
) {
    let store = Arc::new(RwLock::new(MemoryAuctionStore::new()));
    let manager = Arc::new(AuctionManager::new(
        Arc::clone(&store),
        Duration::seconds(300),
    ));
    let service = BidService::new(Arc::clone(&manager), MemoryBidStore::new());
    (service, manager, store)
}

async fn create_auction(manager: &AuctionManager<MemoryAuctionStore>) -> Auction {
    manager
        .create(NewAuction {
            product_name: "iPhone 13".to_string(),
            category: "Electronics".to_string(),
            description: "Brand new iPhone 13 with 128GB storage".to_string(),
            condition: ProductCondition::New,
        })
        .await
        .unwrap()
}

/// 활성 경매에는 입찰이 저장된다
#[tokio::test]
async fn test_place_bid_on_active_auction() {
    let (service, manager, _) = setup();
    let auction = create_auction(&manager).await;

    let bid = service.place_bid("user-1", &auction.id, 150.0).await.unwrap();
    assert_eq!(bid.auction_id, auction.id);
    assert_eq!(bid.amount, 150.0);

    let bids = service.find_by_auction(&auction.id).await.unwrap();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].id, bid.id);
}

/// 완료된 경매에는 금액과 무관하게 입찰이 거절된다
#[tokio::test]
async fn test_place_bid_on_completed_auction_fails() {
    let (service, manager, _) = setup();
    let auction = create_auction(&manager).await;
    manager
        .update_status(&auction.id, AuctionStatus::Completed)
        .await
        .unwrap();

    let result = service.place_bid("user-1", &auction.id, 999_999.0).await;
    assert!(matches!(&result, Err(Error::AuctionNotActive)));
    assert!(result.unwrap_err().is_domain());
}

/// 존재하지 않는 경매에 대한 입찰은 도메인 오류다
#[tokio::test]
async fn test_place_bid_on_missing_auction_fails() {
    let (service, _, _) = setup();

    let result = service.place_bid("user-1", "no-such-auction", 100.0).await;
    assert!(matches!(&result, Err(Error::AuctionNotFound)));
    assert!(result.unwrap_err().is_domain());
}

/// 스윕이 아직 돌지 않았더라도 논리적으로 만료된 경매는 입찰이 거절된다
#[tokio::test]
async fn test_place_bid_on_logically_expired_auction_fails() {
    let (service, _, store) = setup();

    // 상태는 Active 이지만 만료 시각이 지난 경매 (스윕 지연 상황)
    let now = Utc::now();
    let auction = Auction {
        id: "lagging-auction".to_string(),
        product_name: "Lagging Product".to_string(),
        category: "Test".to_string(),
        description: "Sweep has not caught up yet".to_string(),
        condition: ProductCondition::Used,
        status: AuctionStatus::Active,
        timestamp: now - Duration::minutes(10),
        expires_at: now - Duration::seconds(1),
    };
    store.write().await.insert(&auction).await.unwrap();

    let result = service.place_bid("user-1", "lagging-auction", 100.0).await;
    assert!(matches!(result, Err(Error::AuctionExpired)));

    // 거절된 입찰은 저장되지 않는다
    let bids = service.find_by_auction("lagging-auction").await.unwrap();
    assert!(bids.is_empty());
}

/// 낙찰 입찰은 최고 금액 입찰이다
#[tokio::test]
async fn test_winning_bid_is_maximum_amount() {
    let (service, manager, _) = setup();
    let auction = create_auction(&manager).await;

    service.place_bid("user-1", &auction.id, 10.0).await.unwrap();
    service.place_bid("user-2", &auction.id, 25.5).await.unwrap();
    service.place_bid("user-3", &auction.id, 7.0).await.unwrap();

    let winner = service.find_winning_bid(&auction.id).await.unwrap().unwrap();
    assert_eq!(winner.amount, 25.5);
    assert_eq!(winner.user_id, "user-2");
}

/// 동일 금액이면 먼저 들어온 입찰이 낙찰된다
#[tokio::test]
async fn test_winning_bid_tie_break_by_timestamp() {
    let (_service, manager, _) = setup();
    let auction = create_auction(&manager).await;

    let now = Utc::now();
    let earlier = Bid {
        id: "bid-earlier".to_string(),
        user_id: "user-1".to_string(),
        auction_id: auction.id.clone(),
        amount: 50.0,
        timestamp: now - Duration::seconds(30),
    };
    let later = Bid {
        id: "bid-later".to_string(),
        user_id: "user-2".to_string(),
        auction_id: auction.id.clone(),
        amount: 50.0,
        timestamp: now,
    };

    let bid_store = MemoryBidStore::new();
    bid_store.insert(&later).await.unwrap();
    bid_store.insert(&earlier).await.unwrap();

    let winner = bid_store
        .find_winning_by_auction_id(&auction.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(winner.id, "bid-earlier");
}

/// 입찰이 없으면 낙찰 조회는 None 을 반환한다
#[tokio::test]
async fn test_winning_bid_none_without_bids() {
    let (service, manager, _) = setup();
    let auction = create_auction(&manager).await;

    let winner = service.find_winning_bid(&auction.id).await.unwrap();
    assert!(winner.is_none());
}
