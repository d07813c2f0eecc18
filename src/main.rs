//! # OpenRetro 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션 실행
//! 4. API 라우터와 정적 파일 서빙 설정
//! 5. HTTP 서버 시작

// ── 외부 크레이트 및 라이브러리 크레이트에서 필요한 항목 가져오기 ──
use std::path::Path; // 정적 파일 디렉토리 경로

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use openretro::{app, db, AppState, Config}; // 서버와 CLI가 공유하는 라이브러리 크레이트
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: Tokio 비동기 런타임을 만들고 그 안에서 main을 실행하는 어트리뷰트 매크로
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok()로 Result를 버리므로 .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 openretro, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openretro=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting OpenRetro server on {}", config.bind_addr());

    // ── 4단계: 연결 풀 생성과 마이그레이션 ──
    // `?`: 실패하면 에러를 main의 반환값으로 넘기고 서버를 시작하지 않습니다. (./migrations 폴더가 바이너리에 내장됨)
    tracing::info!("Connecting to {} and running migrations...", config.database_url);
    let pool = db::connect(&config).await?;

    let state = AppState { pool };

    // ── 5단계: 라우터 구성 ──
    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다.
    let static_dir = Path::new(&config.static_dir);
    let app = if static_dir.is_dir() {
        tracing::info!("Serving frontend static files from {}", config.static_dir);
        app(state, Some(static_dir))
    } else {
        tracing::warn!("Static directory {} not found, serving API only", config.static_dir);
        app(state, None)
    };

    // ── 6단계: HTTP 서버 시작 ──
    // TcpListener로 포트를 열고, axum::serve가 종료될 때까지 요청을 처리합니다.
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
