//! 에러 타입 정의

use thiserror::Error;

/// PSI 프로토콜 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO 에러: {0}")]
    Io(#[from] std::io::Error),

    #[error("CRC 불일치: expected {expected:08X}, got {got:08X}")]
    CrcMismatch { expected: u32, got: u32 },

    #[error("유효하지 않은 프레임 길이: expected {expected}, got {got}")]
    InvalidFrameLength { expected: usize, got: usize },

    #[error("커맨드가 프레임 바디를 초과: len={len}, max={max}")]
    CommandTooLong { len: usize, max: usize },

    #[error("페이로드가 데이터 프레임을 초과: len={len}, max={max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("파일이 너무 큼 (오프셋 32비트 한계): size={size}")]
    FileTooLarge { size: u64 },

    #[error("교환 실패: {attempts}회 시도 후 응답 없음")]
    ExchangeFailed { attempts: u32 },

    #[error("전송 중단: {step} 단계 실패")]
    Aborted { step: &'static str },

    #[error("전송 치명적 실패: offset={offset} (전체 재전송 필요)")]
    Fatal { offset: u64 },

    #[error("전송 취소됨")]
    Cancelled,
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
