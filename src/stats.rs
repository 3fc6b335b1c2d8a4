//! 전송 통계

use std::time::{Duration, Instant};

/// 전송 통계
///
/// 전송 하나당 하나, 상태 머신이 갱신하고 호출측에 반환
#[derive(Debug, Clone)]
pub struct TransferStats {
    /// 전송 시작 시간
    pub start_time: Instant,

    /// 전송된 데이터그램 수 (재시도 포함)
    pub frames_sent: u64,

    /// 재시도 횟수 (첫 시도 제외)
    pub retries: u64,

    /// 컨트롤 단계 수 (응답 확인 완료 기준)
    pub control_frames: u64,

    /// 데이터 프레임 수 (응답 확인 완료 기준)
    pub data_frames: u64,

    /// 전송된 페이로드 바이트 (패딩 제외)
    pub payload_bytes: u64,

    /// 수신측 속도 힌트 적용 횟수
    pub rate_updates: u64,
}

impl TransferStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            frames_sent: 0,
            retries: 0,
            control_frames: 0,
            data_frames: 0,
            payload_bytes: 0,
            rate_updates: 0,
        }
    }

    /// 경과 시간
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 페이로드 처리율 (bytes/sec)
    pub fn throughput(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            return 0.0;
        }
        self.payload_bytes as f64 / elapsed
    }

    /// 통계 요약 문자열
    pub fn summary(&self) -> String {
        format!(
            "Elapsed: {:.2}s | Frames: {} ctrl + {} data ({} sent, {} retries) | Bytes: {} | Throughput: {:.2} MB/s | Rate updates: {}",
            self.elapsed().as_secs_f64(),
            self.control_frames,
            self.data_frames,
            self.frames_sent,
            self.retries,
            self.payload_bytes,
            self.throughput() / 1_000_000.0,
            self.rate_updates,
        )
    }
}

impl Default for TransferStats {
    fn default() -> Self {
        Self::new()
    }
}
