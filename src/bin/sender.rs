//! PSI 송신자 - Paced Stream Interchange
//!
//! 체크섬-응답 확인형 UDP 파일 전송 송신자
//! - 프레임마다 수신측 OK 응답을 확인하는 stop-and-wait 전송
//! - 수신측 OKSS 속도 힌트에 따라 전송 간격 자동 조정
//!
//! 사용법:
//!   cargo run --release --bin psi-sender -- [OPTIONS]
//!
//! 예시:
//!   # 기본 전송
//!   cargo run --release --bin psi-sender -- --server 127.0.0.1:4000 --file in.txt --name out.txt

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use psi::{Config, Error, Transfer};

/// 송신자 설정
struct SenderConfig {
    bind_addr: SocketAddr,
    server_addr: SocketAddr,
    file_path: Option<PathBuf>,
    dest_name: Option<String>,
    config: Config,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:0".parse().unwrap(),
            server_addr: "127.0.0.1:4000".parse().unwrap(),
            file_path: None,
            dest_name: None,
            config: Config::default(),
        }
    }
}

fn parse_args() -> SenderConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SenderConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    config.bind_addr = args[i + 1].parse().expect("유효한 주소 필요");
                    i += 1;
                }
            }
            "--server" | "-s" => {
                if i + 1 < args.len() {
                    config.server_addr = args[i + 1].parse().expect("유효한 주소 필요");
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    config.file_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--name" | "-n" => {
                if i + 1 < args.len() {
                    config.dest_name = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--timeout" => {
                if i + 1 < args.len() {
                    config.config.reply_timeout_ms =
                        args[i + 1].parse().expect("유효한 숫자 필요");
                    i += 1;
                }
            }
            "--attempts" => {
                if i + 1 < args.len() {
                    config.config.max_attempts = args[i + 1].parse().expect("유효한 숫자 필요");
                    i += 1;
                }
            }
            "--delay" => {
                if i + 1 < args.len() {
                    config.config.initial_delay_ms =
                        args[i + 1].parse().expect("유효한 숫자 필요");
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!(
                    r#"PSI Sender - Paced Stream Interchange 송신자

체크섬-응답 확인형 UDP 파일 전송 프로토콜 송신자
- 4096바이트 고정 프레임 + CRC-32C 체크섬
- 프레임마다 OK 응답 확인, 비응답은 최대 8회 재시도
- 수신측 OKSS 속도 힌트 기반 페이싱

사용법:
  cargo run --release --bin psi-sender -- [OPTIONS]

옵션:
  -b, --bind <ADDR>      로컬 바인드 주소 (기본: 0.0.0.0:0 = 자동 할당)
  -s, --server <ADDR>    수신측 주소 (기본: 127.0.0.1:4000)
  -f, --file <PATH>      전송할 파일 경로 (필수)
  -n, --name <NAME>      수신측 저장 경로 (기본: 파일 이름 그대로)
  --timeout <MS>         응답 대기 타임아웃 (기본: 1000)
  --attempts <N>         교환당 최대 시도 횟수 (기본: 8)
  --delay <MS>           초기 프레임 간 지연 (기본: 0)
  -h, --help             이 도움말 출력

예시:
  # 파일 전송
  cargo run --release --bin psi-sender -- -s 192.168.0.10:4000 -f data.bin -n received.bin
"#
                );
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 로깅 설정
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sender_config = parse_args();

    let file_path = match &sender_config.file_path {
        Some(path) => path.clone(),
        None => {
            error!("전송할 파일이 지정되지 않음 (--file 필요, --help 참고)");
            std::process::exit(1);
        }
    };

    let dest_name = sender_config.dest_name.clone().unwrap_or_else(|| {
        file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "received.bin".to_string())
    });

    info!("PSI Sender starting...");
    info!("Server address: {}", sender_config.server_addr);
    info!("File: {:?} -> {}", file_path, dest_name);

    // 파일은 한 번만 읽음 — 이 버퍼가 다이제스트와 청크 분할의 공통 소스
    let data = Bytes::from(std::fs::read(&file_path)?);
    info!("file size {} bytes", data.len());

    // UDP 소켓 바인딩
    let socket = Arc::new(UdpSocket::bind(sender_config.bind_addr).await?);
    info!("Bound to local address: {}", socket.local_addr()?);

    let mut transfer = Transfer::new(
        socket,
        sender_config.server_addr,
        sender_config.config.clone(),
    );

    match transfer.send_file(&dest_name, &data).await {
        Ok(()) => {
            info!("Transfer complete!");
            info!("  {}", transfer.stats().summary());
            Ok(())
        }
        Err(e @ Error::Aborted { .. }) => {
            error!("전송 포기: {}", e);
            std::process::exit(1);
        }
        Err(e @ Error::Fatal { .. }) => {
            error!("전송 실패 (전체 재전송 필요): {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            error!("전송 에러: {}", e);
            std::process::exit(1);
        }
    }
}
