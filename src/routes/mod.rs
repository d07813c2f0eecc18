//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//! 핸들러는 요청 본문을 꺼내 서비스 계층에 넘기고, 결과를 JSON으로 돌려주기만 합니다.
//!
//! 각 하위 모듈:
//! - `sessions`: 세션 생성/조회/삭제
//! - `cards`: 카드 생성/수정/삭제/병합
//! - `comments`: 코멘트 추가
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod cards;
pub mod comments;
pub mod health;
pub mod sessions;

pub use cards::*;
pub use comments::*;
pub use health::*;
pub use sessions::*;

use std::path::Path;

use axum::{
    extract::FromRequest,          // 커스텀 추출기를 derive로 만드는 매크로
    routing::{get, post, put},     // HTTP 메서드별 라우팅 함수들
    Router,                        // URL 경로와 핸들러를 연결하는 라우터
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},           // CORS 설정
    services::{ServeDir, ServeFile},  // 정적 파일 서빙 서비스
    trace::TraceLayer,                // HTTP 요청/응답 로깅 미들웨어
};

use crate::error::AppError;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// 요청 본문 JSON 추출기
///
/// `axum::Json`과 같지만, 본문이 깨졌거나 필드가 빠진 경우
/// `AppError::Validation`(400, `{"error":{...}}`)으로 응답합니다.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `/api` 아래에 붙는 라우트들
///
/// 경로 파라미터는 axum 0.8 문법(`{id}`)을 사용합니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // 세션 API
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/cards", post(create_card))
        // 카드 API
        .route("/cards/{id}", put(update_card).delete(delete_card))
        .route("/cards/{id}/merge", post(merge_cards))
        .route("/cards/{id}/comments", post(add_comment))
        // 헬스체크 API
        .route("/health", get(health_check))
        .with_state(state)
}

/// 전체 애플리케이션 라우터
///
/// - `/api/...`: JSON API
/// - 그 외 경로: `static_dir`가 있으면 프론트엔드 정적 파일 (찾지 못하면 index.html)
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    // 개발 환경 기준으로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().nest("/api", api_router(state));

    let router = match static_dir {
        Some(dir) => {
            let serve_dir = ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
