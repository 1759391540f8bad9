// region:    --- Imports
use crate::auction::manager::{AuctionManager, NewAuction};
use crate::auction::model::{AuctionStatus, ProductCondition};
use crate::auction::store::{AuctionFilter, PgAuctionStore};
use crate::bidding::service::BidService;
use crate::bidding::store::PgBidStore;
use crate::error::Error;
use crate::user::{PgUserStore, UserStore};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- App State

#[derive(Clone)]
pub struct AppState {
    pub auction_manager: Arc<AuctionManager<PgAuctionStore>>,
    pub bid_service: Arc<BidService<PgAuctionStore, PgBidStore>>,
    pub user_store: Arc<PgUserStore>,
}

// endregion: --- App State

// region:    --- Error Response

/// 오류 -> HTTP 응답 매핑
/// 도메인/검증 오류는 메시지를 그대로 노출하고,
/// 내부 오류는 로그만 남기고 일반 메시지로 응답한다.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::AuctionNotFound | Error::NoBidsFound | Error::UserNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::AuctionNotActive
            | Error::AuctionExpired
            | Error::InvalidStatusTransition
            | Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Internal(e) => {
                error!("{:<12} --> 저장소 오류: {:?}", "Handler", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "내부 서버 오류".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// endregion: --- Error Response

// region:    --- Request DTOs

/// 경매 생성 요청
/// condition 은 정수로 받아 다른 필드와 함께 검증한다
/// (역직렬화 단계에서 거르면 422 로 응답되므로 400 검증 오류로 맞춘다)
#[derive(Debug, Deserialize)]
pub struct CreateAuctionRequest {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: i16,
}

impl CreateAuctionRequest {
    /// 입력 검증: 상품명 비어 있지 않음, 카테고리 2자 이상, 설명 10~200자,
    /// 상품 상태는 0/1/2 중 하나
    fn validate(&self) -> Result<ProductCondition, Error> {
        if self.product_name.trim().is_empty() {
            return Err(Error::Validation("상품명은 비어 있을 수 없습니다".into()));
        }
        if self.category.chars().count() < 2 {
            return Err(Error::Validation("카테고리는 2자 이상이어야 합니다".into()));
        }
        let description_len = self.description.chars().count();
        if !(10..=200).contains(&description_len) {
            return Err(Error::Validation(
                "설명은 10자 이상 200자 이하여야 합니다".into(),
            ));
        }
        ProductCondition::try_from(self.condition)
            .map_err(|_| Error::Validation("상품 상태 값은 0, 1, 2 중 하나여야 합니다".into()))
    }
}

/// 입찰 생성 요청
#[derive(Debug, Deserialize)]
pub struct CreateBidRequest {
    pub user_id: String,
    pub auction_id: String,
    pub amount: f64,
}

impl CreateBidRequest {
    /// 입력 검증: 사용자/경매 식별자 비어 있지 않음, 금액 양수
    fn validate(&self) -> Result<(), Error> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(
                "사용자 식별자는 비어 있을 수 없습니다".into(),
            ));
        }
        if self.auction_id.trim().is_empty() {
            return Err(Error::Validation(
                "경매 식별자는 비어 있을 수 없습니다".into(),
            ));
        }
        // NaN 도 거르도록 부정형으로 비교한다
        if !(self.amount > 0.0) {
            return Err(Error::Validation("입찰 금액은 0보다 커야 합니다".into()));
        }
        Ok(())
    }
}

/// 경매 목록 조회 쿼리
/// status 는 "0"(활성) 또는 "1"(완료)만 인정하며 그 외 값은 필터 없음으로 취급
#[derive(Debug, Deserialize)]
pub struct AuctionQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub product_name: Option<String>,
}

impl AuctionQuery {
    fn into_filter(self) -> AuctionFilter {
        let status = match self.status.as_deref() {
            Some("0") => Some(AuctionStatus::Active),
            Some("1") => Some(AuctionStatus::Completed),
            _ => None,
        };
        AuctionFilter {
            status,
            category: self.category.filter(|c| !c.is_empty()),
            product_name: self.product_name.filter(|p| !p.is_empty()),
        }
    }
}

// endregion: --- Request DTOs

// region:    --- Auction Handlers

/// 경매 생성 요청 처리
pub async fn handle_create_auction(
    State(state): State<AppState>,
    Json(req): Json<CreateAuctionRequest>,
) -> Result<impl IntoResponse, Error> {
    info!("{:<12} --> 경매 생성 요청: {:?}", "Handler", req);
    let condition = req.validate()?;

    let auction = state
        .auction_manager
        .create(NewAuction {
            product_name: req.product_name,
            category: req.category,
            description: req.description,
            condition,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(auction)))
}

/// 경매 단건 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    Path(auction_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let auction = state
        .auction_manager
        .find_by_id(&auction_id)
        .await?
        .ok_or(Error::AuctionNotFound)?;

    Ok(Json(auction))
}

/// 경매 목록 조회 (상태/카테고리/상품명 필터)
pub async fn handle_list_auctions(
    State(state): State<AppState>,
    Query(query): Query<AuctionQuery>,
) -> Result<impl IntoResponse, Error> {
    let auctions = state.auction_manager.find(&query.into_filter()).await?;
    Ok(Json(auctions))
}

// endregion: --- Auction Handlers

// region:    --- Bid Handlers

/// 입찰 생성 요청 처리
pub async fn handle_create_bid(
    State(state): State<AppState>,
    Json(req): Json<CreateBidRequest>,
) -> Result<impl IntoResponse, Error> {
    info!("{:<12} --> 입찰 요청: {:?}", "Handler", req);
    req.validate()?;

    let bid = state
        .bid_service
        .place_bid(&req.user_id, &req.auction_id, req.amount)
        .await?;

    Ok((StatusCode::CREATED, Json(bid)))
}

/// 경매별 입찰 조회
pub async fn handle_get_auction_bids(
    State(state): State<AppState>,
    Path(auction_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let bids = state.bid_service.find_by_auction(&auction_id).await?;
    Ok(Json(bids))
}

/// 낙찰 입찰 조회
pub async fn handle_get_winning_bid(
    State(state): State<AppState>,
    Path(auction_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let bid = state
        .bid_service
        .find_winning_bid(&auction_id)
        .await?
        .ok_or(Error::NoBidsFound)?;

    Ok(Json(bid))
}

// endregion: --- Bid Handlers

// region:    --- User Handlers

/// 사용자 조회
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = state
        .user_store
        .find_by_id(&user_id)
        .await?
        .ok_or(Error::UserNotFound)?;

    Ok(Json(user))
}

// endregion: --- User Handlers

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn auction_request(description: &str) -> CreateAuctionRequest {
        CreateAuctionRequest {
            product_name: "iPhone 13".to_string(),
            category: "Electronics".to_string(),
            description: description.to_string(),
            condition: 0,
        }
    }

    /// 설명 길이 범위를 벗어나면 검증에 실패한다
    #[test]
    fn test_description_length_bounds() {
        assert!(auction_request("too short").validate().is_err());
        assert!(auction_request(&"a".repeat(201)).validate().is_err());
        assert!(auction_request(&"a".repeat(10)).validate().is_ok());
        assert!(auction_request(&"a".repeat(200)).validate().is_ok());
    }

    /// 카테고리가 2자 미만이면 검증에 실패한다
    #[test]
    fn test_category_min_length() {
        let mut req = auction_request("a valid description");
        req.category = "T".to_string();
        assert!(req.validate().is_err());
    }

    /// 범위 밖 상품 상태 값은 400 검증 오류로 거절된다
    #[test]
    fn test_out_of_range_condition_is_validation_error() {
        let mut req = auction_request("a valid description");
        req.condition = 3;
        assert!(matches!(req.validate(), Err(Error::Validation(_))));

        req.condition = 2;
        assert_eq!(req.validate().unwrap(), ProductCondition::Refurbished);
    }

    /// 금액이 0 이하이거나 NaN 인 입찰은 검증에 실패한다
    #[test]
    fn test_bid_amount_must_be_positive() {
        let bid_request = |amount: f64| CreateBidRequest {
            user_id: "user-1".to_string(),
            auction_id: "auction-1".to_string(),
            amount,
        };

        assert!(bid_request(0.0).validate().is_err());
        assert!(bid_request(-5.0).validate().is_err());
        assert!(bid_request(f64::NAN).validate().is_err());
        assert!(bid_request(100.0).validate().is_ok());
    }

    /// 상태 쿼리 값 "0"/"1" 외에는 필터 없음으로 취급된다
    #[test]
    fn test_status_query_parsing() {
        let query = |status: Option<&str>| AuctionQuery {
            status: status.map(String::from),
            category: None,
            product_name: None,
        };

        assert_eq!(
            query(Some("0")).into_filter().status,
            Some(AuctionStatus::Active)
        );
        assert_eq!(
            query(Some("1")).into_filter().status,
            Some(AuctionStatus::Completed)
        );
        assert_eq!(query(Some("abc")).into_filter().status, None);
        assert_eq!(query(None).into_filter().status, None);
    }
}

// endregion: --- Tests
