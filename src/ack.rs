//! 응답 해석기
//!
//! 수신측의 16바이트 고정 응답을 분류
//! - `OK..` (단, 2~3바이트가 `SS`가 아닐 것): 단순 성공
//! - `OKSS` + big-endian bytes/sec: 속도 힌트를 포함한 성공
//! - 그 외 (무응답 포함): 비응답 → 재시도 대상

use crate::FRAME_SIZE;

/// 응답 분류 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// 단순 성공
    Success,

    /// 속도 힌트를 포함한 성공 (bytes/sec)
    SuccessWithRate(u32),

    /// 비응답 (무응답, 깨진 응답 포함)
    NonAck,
}

impl Ack {
    /// 응답 버퍼 분류
    ///
    /// `OKSS`인데 힌트 4바이트가 잘려 있으면 비응답으로 취급
    pub fn classify(buf: &[u8]) -> Ack {
        if buf.len() >= 4 && &buf[..4] == b"OKSS" {
            if buf.len() < 8 {
                return Ack::NonAck;
            }
            let bps = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
            return Ack::SuccessWithRate(bps);
        }

        if buf.len() >= 2 && &buf[..2] == b"OK" {
            return Ack::Success;
        }

        Ack::NonAck
    }

    /// 성공 여부 (힌트 유무 무관)
    pub fn is_success(&self) -> bool {
        !matches!(self, Ack::NonAck)
    }
}

/// 속도 힌트로부터 프레임 간 전송 지연(ms) 계산
///
/// `delay_ms = round(FRAME_SIZE / bps * 1000)`
/// bps가 0이면 무의미한 힌트이므로 무시 (None)
pub fn delay_for_rate(bps: u32) -> Option<u64> {
    if bps == 0 {
        return None;
    }
    Some((FRAME_SIZE as f64 / bps as f64 * 1000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ACK_SIZE;

    #[test]
    fn test_plain_ok() {
        let mut buf = [0u8; ACK_SIZE];
        buf[..2].copy_from_slice(b"OK");
        assert_eq!(Ack::classify(&buf), Ack::Success);
    }

    #[test]
    fn test_ok_with_rate() {
        let mut buf = [0u8; ACK_SIZE];
        buf[..4].copy_from_slice(b"OKSS");
        buf[4..8].copy_from_slice(&1u32.to_be_bytes());

        assert_eq!(Ack::classify(&buf), Ack::SuccessWithRate(1));
        assert_eq!(delay_for_rate(1), Some(4_096_000));
    }

    #[test]
    fn test_rate_delay_rounding() {
        // 4096 / 1_000_000 * 1000 = 4.096 → 4ms
        assert_eq!(delay_for_rate(1_000_000), Some(4));
        // 4096 / 8192 * 1000 = 500ms
        assert_eq!(delay_for_rate(8192), Some(500));
    }

    #[test]
    fn test_zero_rate_ignored() {
        assert_eq!(delay_for_rate(0), None);
    }

    #[test]
    fn test_non_ack() {
        assert_eq!(Ack::classify(&[]), Ack::NonAck);
        assert_eq!(Ack::classify(b"O"), Ack::NonAck);
        assert_eq!(Ack::classify(b"NO"), Ack::NonAck);
        assert_eq!(Ack::classify(&[0u8; ACK_SIZE]), Ack::NonAck);
        assert_eq!(Ack::classify(b"ERR_CHECKSUM\0\0\0\0"), Ack::NonAck);
    }

    #[test]
    fn test_truncated_rate_hint() {
        // OKSS인데 bps 4바이트가 없으면 비응답
        assert_eq!(Ack::classify(b"OKSS"), Ack::NonAck);
        assert_eq!(Ack::classify(b"OKSS\x00"), Ack::NonAck);
    }

    #[test]
    fn test_is_success() {
        assert!(Ack::Success.is_success());
        assert!(Ack::SuccessWithRate(100).is_success());
        assert!(!Ack::NonAck.is_success());
    }

    #[test]
    fn test_short_plain_ok() {
        // 응답이 2바이트뿐이어도 OK면 성공
        assert_eq!(Ack::classify(b"OK"), Ack::Success);
        assert_eq!(Ack::classify(b"OKX"), Ack::Success);
    }
}
