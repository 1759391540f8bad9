// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Bid Model

/// 입찰 모델 (생성 후 불변, 수정/삭제 없음)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: String,
    pub user_id: String,
    pub auction_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl Bid {
    /// 새 입찰 생성: 새 식별자와 현재 시각 발급
    pub fn new(user_id: impl Into<String>, auction_id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            auction_id: auction_id.into(),
            amount,
            timestamp: Utc::now(),
        }
    }
}

// endregion: --- Bid Model
