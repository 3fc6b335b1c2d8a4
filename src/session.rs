//! 전송 세션 상태
//!
//! 전송 하나당 하나 생성되며 상태 머신이 독점 소유

use crate::ack::delay_for_rate;
use crate::DATA_PAYLOAD_SIZE;

/// 전송 세션
///
/// 현재 오프셋, 전체 크기, 파일 다이제스트, 프레임 간 지연을 유지
#[derive(Debug, Clone)]
pub struct TransferSession {
    /// 현재 파일 오프셋 (바이트)
    pub offset: u64,

    /// 파일 전체 크기 (바이트)
    pub total_size: u64,

    /// 파일 전체 MD5 다이제스트 (hex)
    pub digest: String,

    /// 프레임 간 전송 지연 (밀리초, 수신측 힌트로 갱신)
    pub delay_ms: u64,
}

impl TransferSession {
    /// 새 세션 생성 (오프셋 0, 지연은 설정 초기값)
    pub fn new(total_size: u64, digest: String, initial_delay_ms: u64) -> Self {
        Self {
            offset: 0,
            total_size,
            digest,
            delay_ms: initial_delay_ms,
        }
    }

    /// 응답 확인된 청크만큼 오프셋 전진
    pub fn advance(&mut self, acked_len: u64) {
        self.offset += acked_len;
    }

    /// 남은 바이트 수
    pub fn remaining(&self) -> u64 {
        self.total_size.saturating_sub(self.offset)
    }

    /// 다음 청크의 페이로드 길이
    pub fn next_chunk_len(&self) -> usize {
        self.remaining().min(DATA_PAYLOAD_SIZE as u64) as usize
    }

    /// 전체 전송 완료 여부
    pub fn is_complete(&self) -> bool {
        self.offset >= self.total_size
    }

    /// 수신측 속도 힌트 적용
    ///
    /// 유효한 힌트였으면 true
    pub fn apply_rate_hint(&mut self, bps: u32) -> bool {
        match delay_for_rate(bps) {
            Some(delay) => {
                self.delay_ms = delay;
                true
            }
            None => false,
        }
    }
}
