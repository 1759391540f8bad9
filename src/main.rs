// region:    --- Imports
use crate::auction::manager::AuctionManager;
use crate::auction::store::PgAuctionStore;
use crate::auction::sweeper::ExpirationSweeper;
use crate::bidding::service::BidService;
use crate::bidding::store::PgBidStore;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::handlers::AppState;
use crate::user::PgUserStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod config;
mod database;
mod error;
mod handlers;
mod user;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let app_config = AppConfig::from_env();
    info!(
        "{:<12} --> 경매 진행 시간: {:?}, 스윕 주기: {:?}",
        "Main", app_config.auction_duration, app_config.sweep_interval
    );

    // DatabaseManager 생성
    let db_manager = DatabaseManager::new(&app_config.database_url).await?;

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
    let pool = db_manager.get_pool();

    // 경매 매니저 생성 (저장소 잠금은 여기서 주입)
    let auction_store = Arc::new(RwLock::new(PgAuctionStore::new(Arc::clone(&pool))));
    let auction_manager = Arc::new(AuctionManager::new(
        auction_store,
        chrono::Duration::from_std(app_config.auction_duration)?,
    ));

    // 만료 스윕 시작 (핸들은 프로세스 수명 동안 유지)
    let sweeper = ExpirationSweeper::new(Arc::clone(&auction_manager), app_config.sweep_interval);
    let _sweeper_handle = sweeper.start();

    // 입찰 서비스 및 사용자 저장소 생성
    let bid_service = Arc::new(BidService::new(
        Arc::clone(&auction_manager),
        PgBidStore::new(Arc::clone(&pool)),
    ));
    let user_store = Arc::new(PgUserStore::new(pool));

    let state = AppState {
        auction_manager,
        bid_service,
        user_store,
    };

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route(
            "/auction",
            post(handlers::handle_create_auction).get(handlers::handle_list_auctions),
        )
        .route("/auction/:auction_id", get(handlers::handle_get_auction))
        .route("/bid", post(handlers::handle_create_bid))
        .route(
            "/bid/auction/:auction_id",
            get(handlers::handle_get_auction_bids),
        )
        .route(
            "/bid/auction/:auction_id/winner",
            get(handlers::handle_get_winning_bid),
        )
        .route("/user/:user_id", get(handlers::handle_get_user))
        .layer(cors)
        .with_state(state);

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
