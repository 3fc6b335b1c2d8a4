//! 신뢰 교환
//!
//! 프레임 하나를 보내고 응답 하나를 기다리는 stop-and-wait 교환.
//! 채널의 비신뢰성을 흡수하는 유일한 지점 — 위 계층은 성공 또는
//! 최종 실패 두 가지 결과만 본다.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::{debug, warn};

use crate::ack::Ack;
use crate::session::TransferSession;
use crate::{Config, Error, Result};

/// 신뢰 교환기
///
/// 소켓과 수신측 주소를 소유하고, 교환 단위의 재시도/타임아웃/취소를 담당
pub struct Exchange {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    config: Config,

    /// 취소 플래그 (시도 사이, 청크 사이에 확인)
    cancelled: AtomicBool,
}

impl Exchange {
    /// 새 교환기 생성
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr, config: Config) -> Self {
        Self {
            socket,
            peer,
            config,
            cancelled: AtomicBool::new(false),
        }
    }

    /// 진행 중인 전송 취소 요청
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// 취소 여부
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// 설정 참조
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 프레임 전송 + 응답 대기, 최대 `max_attempts`회
    ///
    /// 재시도는 동일한 프레임 바이트를 그대로 다시 전송.
    /// 응답 타임아웃은 비응답과 동일 취급.
    /// 성공 시 (응답, 사용한 시도 횟수) 반환, 속도 힌트는 세션에 즉시 적용.
    pub async fn send_with_retry(
        &self,
        frame: &[u8],
        session: &mut TransferSession,
    ) -> Result<(Ack, u32)> {
        let timeout = Duration::from_millis(self.config.reply_timeout_ms);
        let mut reply = [0u8; 64];

        for attempt in 1..=self.config.max_attempts {
            if self.is_cancelled() {
                return Err(Error::Cancelled);
            }

            self.socket.send_to(frame, self.peer).await?;

            let ack = match tokio::time::timeout(timeout, self.socket.recv_from(&mut reply)).await
            {
                Ok(Ok((len, _))) => Ack::classify(&reply[..len]),
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    debug!("응답 타임아웃 (attempt {}/{})", attempt, self.config.max_attempts);
                    Ack::NonAck
                }
            };

            match ack {
                Ack::NonAck => {
                    if attempt < self.config.max_attempts {
                        debug!("비응답, 재시도 {}/{}", attempt, self.config.max_attempts);
                    }
                }
                Ack::SuccessWithRate(bps) => {
                    if session.apply_rate_hint(bps) {
                        debug!("속도 힌트 적용: {} bytes/s -> delay {}ms", bps, session.delay_ms);
                    } else {
                        warn!("무의미한 속도 힌트 무시: {} bytes/s", bps);
                    }
                    return Ok((ack, attempt));
                }
                Ack::Success => return Ok((ack, attempt)),
            }
        }

        Err(Error::ExchangeFailed {
            attempts: self.config.max_attempts,
        })
    }
}
