//! 프레임 코덱
//!
//! - 모든 프레임은 [`FRAME_SIZE`] 바이트 고정
//! - 바디(4092바이트)에 대한 CRC-32C를 big-endian으로 뒤에 붙임
//! - 컨트롤 프레임: 0부터 시작하는 ASCII 커맨드 문자열, 0으로 패딩
//! - 데이터 프레임: `DATA` 태그 + big-endian 오프셋 + 페이로드, 0으로 패딩

use crate::{
    Error, Result, BODY_SIZE, DATA_HEADER_SIZE, DATA_PAYLOAD_SIZE, DATA_TAG, FRAME_SIZE,
};

/// 컨트롤 커맨드
///
/// 핸드쉐이크 단계마다 하나씩 전송되는 ASCII 커맨드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// 수신측 저장 경로
    Name(&'a str),

    /// 파일 전체 크기 (10진수)
    Size(u64),

    /// 파일 전체 MD5 다이제스트 (hex)
    Hash(&'a str),

    /// 데이터 스트리밍 시작
    Start,

    /// 데이터 스트리밍 종료
    Stop,
}

impl Command<'_> {
    /// 커맨드의 ASCII 표현
    pub fn format(&self) -> String {
        match self {
            Command::Name(path) => format!("NAME={}", path),
            Command::Size(size) => format!("SIZE={}", size),
            Command::Hash(hash) => format!("HASH={}", hash),
            Command::Start => "START".to_string(),
            Command::Stop => "STOP".to_string(),
        }
    }

    /// 단계 이름 (로깅/에러 보고용)
    pub fn step_name(&self) -> &'static str {
        match self {
            Command::Name(_) => "NAME",
            Command::Size(_) => "SIZE",
            Command::Hash(_) => "HASH",
            Command::Start => "START",
            Command::Stop => "STOP",
        }
    }

    /// 컨트롤 프레임으로 인코딩
    ///
    /// 커맨드 텍스트가 바디보다 길면 잘라내지 않고 에러 반환
    pub fn encode(&self) -> Result<Vec<u8>> {
        let text = self.format();
        if text.len() > BODY_SIZE {
            return Err(Error::CommandTooLong {
                len: text.len(),
                max: BODY_SIZE,
            });
        }
        Ok(encode_body(text.as_bytes()))
    }
}

/// 바디를 고정 크기 프레임으로 인코딩
///
/// 바디를 4092바이트로 0-패딩(초과분은 잘림)하고 CRC-32C를 big-endian으로 붙임
pub fn encode_body(body: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_SIZE];
    let len = body.len().min(BODY_SIZE);
    frame[..len].copy_from_slice(&body[..len]);

    // 체크섬은 전송 직전 항상 새로 계산
    let crc = crc32c::crc32c(&frame[..BODY_SIZE]);
    frame[BODY_SIZE..].copy_from_slice(&crc.to_be_bytes());
    frame
}

/// 데이터 프레임 인코딩
///
/// `DATA` + big-endian 오프셋 + 페이로드 (마지막 청크는 0-패딩)
pub fn encode_data(offset: u32, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > DATA_PAYLOAD_SIZE {
        return Err(Error::PayloadTooLarge {
            len: payload.len(),
            max: DATA_PAYLOAD_SIZE,
        });
    }

    let mut body = vec![0u8; DATA_HEADER_SIZE + payload.len()];
    body[..4].copy_from_slice(DATA_TAG);
    body[4..8].copy_from_slice(&offset.to_be_bytes());
    body[8..].copy_from_slice(payload);
    Ok(encode_body(&body))
}

/// 프레임 검증 및 바디 추출
///
/// 수신측이 쓰는 절반이지만 상호운용을 위해 양쪽 모두 구현
pub fn decode_and_verify(frame: &[u8]) -> Result<&[u8]> {
    if frame.len() != FRAME_SIZE {
        return Err(Error::InvalidFrameLength {
            expected: FRAME_SIZE,
            got: frame.len(),
        });
    }

    let expected = crc32c::crc32c(&frame[..BODY_SIZE]);
    let got = u32::from_be_bytes([
        frame[BODY_SIZE],
        frame[BODY_SIZE + 1],
        frame[BODY_SIZE + 2],
        frame[BODY_SIZE + 3],
    ]);

    if expected != got {
        return Err(Error::CrcMismatch { expected, got });
    }

    Ok(&frame[..BODY_SIZE])
}

/// 프레임 바디가 데이터 프레임인지 확인하고 (오프셋, 페이로드) 반환
///
/// 페이로드는 패딩 포함 고정 길이 — 실제 길이는 SIZE 커맨드 기준으로 수신측이 계산
pub fn decode_data_body(body: &[u8]) -> Option<(u32, &[u8])> {
    if body.len() < DATA_HEADER_SIZE || &body[..4] != DATA_TAG {
        return None;
    }
    let offset = u32::from_be_bytes([body[4], body[5], body[6], body[7]]);
    Some((offset, &body[DATA_HEADER_SIZE..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32c_check_vector() {
        // CRC-32C (Castagnoli) 표준 체크 벡터
        assert_eq!(crc32c::crc32c(b"123456789"), 0xE3069283);
    }

    #[test]
    fn test_encode_verify_roundtrip() {
        let body: Vec<u8> = (0..BODY_SIZE).map(|i| (i % 251) as u8).collect();
        let frame = encode_body(&body);

        assert_eq!(frame.len(), FRAME_SIZE);
        let decoded = decode_and_verify(&frame).unwrap();
        assert_eq!(decoded, &body[..]);
    }

    #[test]
    fn test_bit_flip_detected() {
        let frame = encode_body(b"START");

        // 바디 앞, 바디 끝, 체크섬 필드 각각 1비트 플립
        for &pos in &[0usize, BODY_SIZE - 1, FRAME_SIZE - 1] {
            let mut corrupted = frame.clone();
            corrupted[pos] ^= 0x01;
            assert!(
                matches!(decode_and_verify(&corrupted), Err(Error::CrcMismatch { .. })),
                "flip at {} not detected",
                pos
            );
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            decode_and_verify(&[0u8; 100]),
            Err(Error::InvalidFrameLength { got: 100, .. })
        ));
    }

    #[test]
    fn test_control_frame_layout() {
        let frame = Command::Name("D:\\out.txt").encode().unwrap();

        assert_eq!(frame.len(), FRAME_SIZE);
        assert_eq!(&frame[..11], b"NAME=D:\\out");
        // 커맨드 뒤는 전부 0 패딩
        assert!(frame[15..BODY_SIZE].iter().all(|&b| b == 0));
        decode_and_verify(&frame).unwrap();
    }

    #[test]
    fn test_command_formats() {
        assert_eq!(Command::Size(10000).format(), "SIZE=10000");
        assert_eq!(Command::Hash("abc123").format(), "HASH=abc123");
        assert_eq!(Command::Start.format(), "START");
        assert_eq!(Command::Stop.format(), "STOP");
    }

    #[test]
    fn test_command_too_long() {
        let long_path = "x".repeat(BODY_SIZE);
        let err = Command::Name(&long_path).encode().unwrap_err();
        assert!(matches!(err, Error::CommandTooLong { len, max }
            if len == BODY_SIZE + 5 && max == BODY_SIZE));
    }

    #[test]
    fn test_data_frame_layout() {
        let payload = b"hello";
        let frame = encode_data(4084, payload).unwrap();

        assert_eq!(&frame[..4], DATA_TAG);
        assert_eq!(&frame[4..8], &4084u32.to_be_bytes());
        assert_eq!(&frame[8..13], payload);
        // 짧은 청크는 0 패딩
        assert!(frame[13..BODY_SIZE].iter().all(|&b| b == 0));

        let body = decode_and_verify(&frame).unwrap();
        let (offset, data) = decode_data_body(body).unwrap();
        assert_eq!(offset, 4084);
        assert_eq!(&data[..5], payload);
    }

    #[test]
    fn test_payload_too_large() {
        let payload = vec![0u8; DATA_PAYLOAD_SIZE + 1];
        assert!(matches!(
            encode_data(0, &payload),
            Err(Error::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn test_full_payload_fits() {
        let payload = vec![0xABu8; DATA_PAYLOAD_SIZE];
        let frame = encode_data(0, &payload).unwrap();
        let body = decode_and_verify(&frame).unwrap();
        let (_, data) = decode_data_body(body).unwrap();
        assert_eq!(data, &payload[..]);
    }
}
