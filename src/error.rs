// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Store Error

/// 저장소 계층 오류 (인프라 실패)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("중복된 키입니다: {0}")]
    DuplicateKey(String),

    #[error("손상된 레코드입니다: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// endregion: --- Store Error

// region:    --- Service Error

/// 서비스 오류 분류
/// - 도메인 오류: 예상된 비즈니스 규칙 거절 (실패 로그 대상 아님)
/// - 검증 오류: 핸들러 계층에서 걸러지는 잘못된 입력
/// - 내부 오류: 저장소 연결/IO 실패 (로그 후 일반 메시지로 노출)
#[derive(Debug, Error)]
pub enum Error {
    #[error("경매를 찾을 수 없습니다")]
    AuctionNotFound,

    #[error("경매가 활성 상태가 아닙니다")]
    AuctionNotActive,

    #[error("경매가 이미 만료되었습니다")]
    AuctionExpired,

    #[error("해당 경매에 입찰이 없습니다")]
    NoBidsFound,

    #[error("완료된 경매는 다시 활성화할 수 없습니다")]
    InvalidStatusTransition,

    #[error("사용자를 찾을 수 없습니다")]
    UserNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("내부 서버 오류")]
    Internal(#[from] StoreError),
}

impl Error {
    /// 도메인 오류 여부 (인프라 실패와 구분)
    pub fn is_domain(&self) -> bool {
        !matches!(self, Error::Internal(_) | Error::Validation(_))
    }
}

// endregion: --- Service Error
