//! # PSI (Paced Stream Interchange)
//!
//! UDP 기반 체크섬-응답 확인형 파일 전송 프로토콜
//!
//! ## 핵심 특징
//! - **고정 크기 프레임**: 모든 프레임은 4096바이트, 마지막 4바이트는 CRC-32C
//! - **체크섬-응답 교환**: 프레임마다 수신측 OK 응답을 기다리는 stop-and-wait
//! - **제한 재전송**: 응답 없는 프레임은 최대 8회 시도 후 실패 처리
//! - **수신측 주도 속도 조절**: OKSS 응답의 bytes/sec 힌트로 전송 간격 결정
//! - **전체 파일 검증**: 전송 전 MD5 다이제스트를 HASH 프레임으로 전달

pub mod ack;
pub mod config;
pub mod digest;
pub mod error;
pub mod exchange;
pub mod frame;
pub mod session;
pub mod stats;
pub mod transfer;

pub use ack::Ack;
pub use config::Config;
pub use digest::file_digest;
pub use error::{Error, Result};
pub use exchange::Exchange;
pub use frame::Command;
pub use session::TransferSession;
pub use stats::TransferStats;
pub use transfer::Transfer;

/// 프레임 크기 (바이트, 컨트롤/데이터 공통)
pub const FRAME_SIZE: usize = 4096;

/// 체크섬 크기 (CRC-32C, big-endian)
pub const CHECKSUM_SIZE: usize = 4;

/// 프레임 바디 크기 (체크섬 제외)
pub const BODY_SIZE: usize = FRAME_SIZE - CHECKSUM_SIZE;

/// 데이터 프레임 태그
pub const DATA_TAG: &[u8; 4] = b"DATA";

/// 데이터 프레임 헤더 크기 (태그 4 + 오프셋 4)
pub const DATA_HEADER_SIZE: usize = 8;

/// 데이터 프레임당 최대 페이로드 (바이트)
pub const DATA_PAYLOAD_SIZE: usize = BODY_SIZE - DATA_HEADER_SIZE;

/// 응답 프레임 크기 (바이트)
pub const ACK_SIZE: usize = 16;

/// 교환당 기본 최대 시도 횟수
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
