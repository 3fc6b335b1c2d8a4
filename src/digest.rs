//! 파일 다이제스트 계산
//!
//! 전송 전 파일 전체에 대해 한 번 계산되어 HASH 프레임으로 전달됨.
//! 청크 분할과 무관하게 동일한 바이트 시퀀스를 입력으로 받아야 하므로
//! 호출측은 파일을 한 번만 읽어 다이제스트와 청크 분할 양쪽에 써야 함.

use md5::{Digest, Md5};

/// 파일 내용 전체의 MD5 다이제스트 (소문자 hex)
pub fn file_digest(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(file_digest(b"hello"), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(file_digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_digest_independent_of_chunking() {
        // 청크 경계보다 큰 입력도 전체를 한 번에 계산
        let data: Vec<u8> = (0..10000u32).map(|i| (i % 256) as u8).collect();
        let whole = file_digest(&data);

        let mut hasher = Md5::new();
        for chunk in data.chunks(4084) {
            hasher.update(chunk);
        }
        assert_eq!(whole, hex::encode(hasher.finalize()));
    }
}
