// region:    --- Imports
use crate::auction::manager::AuctionManager;
use crate::auction::store::AuctionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Expiration Sweeper

/// 만료 스윕 백그라운드 태스크
///
/// 고정 주기로 만료된 활성 경매를 Completed 로 전환한다.
/// 매니저 생성과 분리된 명시적 시작/중지 생명주기를 가지므로
/// 테스트에서는 start 없이 close_expired 를 직접 호출할 수 있다.
pub struct ExpirationSweeper<S: AuctionStore> {
    manager: Arc<AuctionManager<S>>,
    tick_interval: Duration,
}

/// 실행 중인 스윕 태스크 핸들
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// 스윕 중지: 종료 신호를 보내고 태스크가 끝날 때까지 대기
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

impl<S: AuctionStore + 'static> ExpirationSweeper<S> {
    pub fn new(manager: Arc<AuctionManager<S>>, tick_interval: Duration) -> Self {
        Self {
            manager,
            tick_interval,
        }
    }

    /// 스윕 시작
    /// 틱마다 만료 경매를 종료하며, 조회 실패는 로그 후 다음 틱에 재시도한다.
    pub fn start(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = self.manager;
        let tick_interval = self.tick_interval;

        info!(
            "{:<12} --> 만료 스윕 시작 (주기: {:?})",
            "Sweeper", tick_interval
        );

        let task = tokio::spawn(async move {
            let mut ticker = interval(tick_interval);
            // 시작 직후의 즉시 틱은 건너뛴다
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = manager.close_expired().await {
                            error!(
                                "{:<12} --> 만료 경매 종료 중 오류 발생: {:?}",
                                "Sweeper", e
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("{:<12} --> 만료 스윕 중지", "Sweeper");
                        break;
                    }
                }
            }
        });

        SweeperHandle { shutdown_tx, task }
    }
}

// endregion: --- Expiration Sweeper
