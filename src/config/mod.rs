// region:    --- Imports
use std::time::Duration;
use tracing::warn;

// endregion: --- Imports

// region:    --- App Config

/// 경매 생성 시 기본 진행 시간 (5분)
pub const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(300);
/// 만료 스윕 기본 주기 (10초)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// 환경 변수 기반 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub auction_duration: Duration,
    pub sweep_interval: Duration,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    /// AUCTION_DURATION / AUCTION_CHECK_INTERVAL 은 초 단위이며,
    /// 없거나 숫자가 아니면 기본값으로 대체한다.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let auction_duration = duration_from_env(
            std::env::var("AUCTION_DURATION").ok(),
            "AUCTION_DURATION",
            DEFAULT_AUCTION_DURATION,
        );
        let sweep_interval = duration_from_env(
            std::env::var("AUCTION_CHECK_INTERVAL").ok(),
            "AUCTION_CHECK_INTERVAL",
            DEFAULT_SWEEP_INTERVAL,
        );

        Self {
            database_url,
            auction_duration,
            sweep_interval,
        }
    }
}

/// 초 단위 환경 변수 값을 Duration 으로 변환
fn duration_from_env(raw: Option<String>, key: &str, default: Duration) -> Duration {
    match raw {
        None => default,
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "{:<12} --> {} 값이 올바르지 않아 기본값을 사용합니다: {:?}",
                    "Config", key, value
                );
                default
            }
        },
    }
}

// endregion: --- App Config

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    /// 유효한 초 값은 그대로 사용된다
    #[test]
    fn test_valid_duration_value() {
        let d = duration_from_env(
            Some("300".to_string()),
            "AUCTION_DURATION",
            DEFAULT_AUCTION_DURATION,
        );
        assert_eq!(d, Duration::from_secs(300));
    }

    /// 값이 없으면 기본값을 사용한다
    #[test]
    fn test_absent_value_falls_back_to_default() {
        let d = duration_from_env(None, "AUCTION_DURATION", DEFAULT_AUCTION_DURATION);
        assert_eq!(d, Duration::from_secs(300));
    }

    /// 숫자가 아니면 기본값으로 대체된다
    #[test]
    fn test_non_numeric_value_falls_back_to_default() {
        let d = duration_from_env(
            Some("invalid".to_string()),
            "AUCTION_CHECK_INTERVAL",
            DEFAULT_SWEEP_INTERVAL,
        );
        assert_eq!(d, Duration::from_secs(10));
    }
}

// endregion: --- Tests
