//! 프로토콜 설정

use crate::DEFAULT_MAX_ATTEMPTS;

/// PSI 프로토콜 설정
///
/// 프레임/응답 크기는 와이어 포맷 상수이므로 여기 포함하지 않음
#[derive(Debug, Clone)]
pub struct Config {
    /// 교환당 최대 시도 횟수
    pub max_attempts: u32,

    /// 응답 대기 타임아웃 (밀리초)
    /// 타임아웃은 비응답과 동일하게 취급되어 재시도로 이어짐
    pub reply_timeout_ms: u64,

    /// 초기 프레임 간 지연 (밀리초)
    /// 수신측 OKSS 힌트가 오면 덮어씀
    pub initial_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reply_timeout_ms: 1000,
            initial_delay_ms: 0,
        }
    }
}

impl Config {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// LAN 환경용 설정
    pub fn lan() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reply_timeout_ms: 200,
            initial_delay_ms: 0,
        }
    }

    /// 불안정한 네트워크용 설정
    pub fn unstable_network() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reply_timeout_ms: 3000,
            initial_delay_ms: 10,
        }
    }
}
