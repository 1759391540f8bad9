// region:    --- Imports
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Auction Status

/// 경매 상태 (0 = 활성, 1 = 완료)
/// 상태 전이는 Active -> Completed 단방향만 허용된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl TryFrom<i16> for AuctionStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AuctionStatus::Active),
            1 => Ok(AuctionStatus::Completed),
            other => Err(format!("잘못된 경매 상태 값입니다: {}", other)),
        }
    }
}

impl From<AuctionStatus> for i16 {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => 0,
            AuctionStatus::Completed => 1,
        }
    }
}

// endregion: --- Auction Status

// region:    --- Product Condition

/// 상품 상태 (0 = 신품, 1 = 중고, 2 = 리퍼)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl TryFrom<i16> for ProductCondition {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProductCondition::New),
            1 => Ok(ProductCondition::Used),
            2 => Ok(ProductCondition::Refurbished),
            other => Err(format!("잘못된 상품 상태 값입니다: {}", other)),
        }
    }
}

impl From<ProductCondition> for i16 {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => 0,
            ProductCondition::Used => 1,
            ProductCondition::Refurbished => 2,
        }
    }
}

// endregion: --- Product Condition

// region:    --- Auction Model

/// 경매 모델
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    pub timestamp: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Auction {
    /// 새 경매 생성: 상태는 항상 Active, 만료 시각은 생성 시각 + 진행 시간
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
        duration: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            timestamp: now,
            expires_at: now + duration,
        }
    }

    /// 만료 여부 (만료 시각이 now 이전이거나 같으면 만료)
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// endregion: --- Auction Model

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    /// 새 경매는 Active 상태이며 만료 시각이 진행 시간만큼 뒤다
    #[test]
    fn test_new_auction_is_active_with_expiry_offset() {
        let auction = Auction::new(
            "iPhone 13",
            "Electronics",
            "Brand new iPhone 13 with 128GB storage",
            ProductCondition::New,
            Duration::seconds(300),
        );

        assert_eq!(auction.status, AuctionStatus::Active);
        assert_eq!(auction.expires_at - auction.timestamp, Duration::seconds(300));
        assert!(!auction.id.is_empty());
    }

    /// 만료 시각이 지난 경매는 is_expired 가 참이다
    #[test]
    fn test_is_expired() {
        let mut auction = Auction::new(
            "Expired Product",
            "Test",
            "This product should expire quickly",
            ProductCondition::Used,
            Duration::seconds(1),
        );
        auction.expires_at = Utc::now() - Duration::seconds(5);

        assert!(auction.is_expired(Utc::now()));
    }

    /// 범위를 벗어난 상태 값은 역직렬화에 실패한다
    #[test]
    fn test_out_of_range_status_is_rejected() {
        assert!(AuctionStatus::try_from(2).is_err());
        assert!(ProductCondition::try_from(3).is_err());
    }
}

// endregion: --- Tests
