//! 전송 상태 머신
//!
//! `INIT → NAME → SIZE → HASH → START → 데이터 스트리밍 → STOP → DONE`
//! 순서의 단계별 교환을 구동. 어느 단계에서든 실패하면 전송 전체가 종료됨.
//!
//! 실패 정책:
//! - 컨트롤 단계 실패: [`Error::Aborted`] — 전송 포기, 단계 이름 보고
//! - 데이터 스트리밍 실패: [`Error::Fatal`] — 수신측에 부분 데이터가 남아
//!   있을 수 있으므로 전체 재전송 필요

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use crate::ack::Ack;
use crate::digest::file_digest;
use crate::frame::{self, Command};
use crate::session::TransferSession;
use crate::stats::TransferStats;
use crate::{Config, Error, Exchange, Result, DATA_PAYLOAD_SIZE};

/// 파일을 청크로 나눈 (오프셋, 페이로드 길이) 목록
///
/// 다이제스트와 달리 청크 분할은 전송 단위 — 마지막 청크만 짧을 수 있음
pub fn chunk_plan(total_size: usize) -> Vec<(u32, usize)> {
    let mut plan = Vec::with_capacity(total_size.div_ceil(DATA_PAYLOAD_SIZE));
    let mut offset = 0usize;
    while offset < total_size {
        let len = (total_size - offset).min(DATA_PAYLOAD_SIZE);
        plan.push((offset as u32, len));
        offset += len;
    }
    plan
}

/// 전송 상태 머신
pub struct Transfer {
    exchange: Exchange,
    stats: TransferStats,
}

impl Transfer {
    /// 새 전송 생성
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr, config: Config) -> Self {
        Self {
            exchange: Exchange::new(socket, peer, config),
            stats: TransferStats::new(),
        }
    }

    /// 진행 중인 전송 취소 요청
    pub fn stop(&self) {
        self.exchange.stop();
    }

    /// 누적 통계
    pub fn stats(&self) -> &TransferStats {
        &self.stats
    }

    /// 파일 하나 전송
    ///
    /// `data`는 다이제스트 계산과 청크 분할에 공통으로 쓰이는 유일한
    /// 바이트 소스 — 호출측은 파일을 한 번만 읽어 넘겨야 함
    pub async fn send_file(&mut self, dest_name: &str, data: &Bytes) -> Result<()> {
        if data.len() as u64 > u64::from(u32::MAX) {
            return Err(Error::FileTooLarge {
                size: data.len() as u64,
            });
        }

        self.stats = TransferStats::new();

        // 전송 전에 전체 파일 다이제스트 계산
        let digest = file_digest(data);
        let mut session = TransferSession::new(
            data.len() as u64,
            digest.clone(),
            self.exchange.config().initial_delay_ms,
        );

        info!(
            "전송 시작: name={}, size={} bytes, md5={}",
            dest_name,
            data.len(),
            digest
        );

        // 핸드쉐이크: NAME → SIZE → HASH → START
        self.control_step(Command::Name(dest_name), &mut session).await?;
        self.control_step(Command::Size(session.total_size), &mut session).await?;
        self.control_step(Command::Hash(&digest), &mut session).await?;
        self.control_step(Command::Start, &mut session).await?;

        // 데이터 스트리밍
        for (offset, len) in chunk_plan(data.len()) {
            if self.exchange.is_cancelled() {
                return Err(Error::Cancelled);
            }

            debug_assert_eq!(u64::from(offset), session.offset);
            debug_assert_eq!(len, session.next_chunk_len());

            let start = offset as usize;
            let frame = frame::encode_data(offset, &data[start..start + len])?;

            match self.exchange.send_with_retry(&frame, &mut session).await {
                Ok((ack, attempts)) => {
                    self.record(ack, attempts);
                    self.stats.data_frames += 1;
                    self.stats.payload_bytes += len as u64;
                }
                Err(Error::ExchangeFailed { .. }) => {
                    // 수신측에 부분 데이터가 남았을 수 있음 — 전체 재전송 필요
                    return Err(Error::Fatal {
                        offset: session.offset,
                    });
                }
                Err(e) => return Err(e),
            }

            session.advance(len as u64);
            debug!(
                "청크 전송 완료: offset={}, len={}, remaining={}",
                offset,
                len,
                session.remaining()
            );

            // 수신측이 정한 속도로 페이싱
            if session.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(session.delay_ms)).await;
            }
        }

        // 스트림 종료
        self.control_step(Command::Stop, &mut session).await?;

        info!("전송 완료: {}", self.stats.summary());
        Ok(())
    }

    /// 컨트롤 단계 하나 실행
    ///
    /// 교환 실패는 단계 이름과 함께 [`Error::Aborted`]로 변환
    async fn control_step(
        &mut self,
        command: Command<'_>,
        session: &mut TransferSession,
    ) -> Result<()> {
        let step = command.step_name();
        let frame = command.encode()?;

        match self.exchange.send_with_retry(&frame, session).await {
            Ok((ack, attempts)) => {
                self.record(ack, attempts);
                self.stats.control_frames += 1;
                debug!("컨트롤 단계 완료: {}", step);
                Ok(())
            }
            Err(Error::ExchangeFailed { .. }) => Err(Error::Aborted { step }),
            Err(e) => Err(e),
        }
    }

    /// 교환 결과를 통계에 반영
    fn record(&mut self, ack: Ack, attempts: u32) {
        self.stats.frames_sent += u64::from(attempts);
        self.stats.retries += u64::from(attempts - 1);
        if matches!(ack, Ack::SuccessWithRate(_)) {
            self.stats.rate_updates += 1;
        }
    }
}
