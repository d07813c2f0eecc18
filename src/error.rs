//! # 에러 처리 모듈
//!
//! 회고 보드에서 발생할 수 있는 모든 에러 종류를 하나의 `AppError`로 모읍니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 검증 실패, 없는 리소스, 세션 간 병합, 저장소 오류 등
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 서비스 계층은 `Result<T, AppError>`를 반환하고, 라우트 핸들러는 그대로 `?`로 전파합니다.
//! 트랜잭션 도중 에러가 나면 `sqlx::Transaction`이 drop되면서 롤백되므로
//! 어떤 에러도 부분적으로 커밋된 상태를 남기지 않습니다.

use axum::{
    extract::rejection::JsonRejection, // Json 추출 실패 (본문 형식 오류, 필드 누락 등)
    http::StatusCode,                  // HTTP 상태 코드 (400, 404, 409, 500)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                              // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: 에러 본문을 만들 때 사용
use thiserror::Error; // thiserror: Display와 std::error::Error를 derive로 구현

// #[derive(Debug, Error)]: thiserror가 각 variant의 #[error("...")]로 Display를 생성합니다.
// {0}은 variant의 첫 번째 필드를 가리킵니다.

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 variant는 고유한 에러 코드와 HTTP 상태 코드로 변환됩니다.
/// 클라이언트는 `error.code`로 검증 오류(400)와 없는 리소스(404)를 구분할 수 있습니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 입력 (HTTP 400)
    /// 컬럼 종류가 허용 목록에 없거나, 필수 필드가 비었거나, 길이 제한을 넘은 경우
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    /// 필드에는 리소스 종류("Session", "Card" 등)가 들어갑니다.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 서로 다른 세션의 카드끼리 병합하려는 경우 (HTTP 400)
    #[error("Cards must be in the same session to merge")]
    CrossSession,

    /// 이미 다른 카드에 흡수된 카드가 병합에 관여하는 경우 (HTTP 409)
    #[error("Card {0} has already been merged")]
    AlreadyMerged(String),

    /// 트랜잭션 도중 있어야 할 행이 사라진 경우 등 내부 불변식 위반 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 마이그레이션 실패 (서버 시작 시에만 발생)
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

// 요청 본문이 JSON으로 파싱되지 않거나 필드 타입이 맞지 않으면
// axum 기본 응답(422, text/plain) 대신 검증 오류(400)와 같은 형식으로 돌려줍니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// 클라이언트에 노출되는 기계 판독용 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::CrossSession => "cross_session",
            AppError::AlreadyMerged(_) => "already_merged",
            AppError::Internal(_) => "internal_error",
            AppError::Database(_) | AppError::Migration(_) => "database_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        // 클라이언트 잘못(4xx)과 서버 잘못(5xx)을 나눕니다.
        match self {
            AppError::Validation(_) | AppError::CrossSession => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyMerged(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) | AppError::Migration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// 핸들러가 Err(AppError)를 반환하면 Axum이 이 구현으로 HTTP 응답을 만듭니다.
impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 서버 측 에러(Database, Migration, Internal)는 실제 내용을 로그에만 남기고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // ref: self를 이동(move)하지 않고 내부 값만 빌려옵니다.
        let message = match self {
            AppError::Database(ref e) => {
                tracing::error!(error = %e, "database error");
                "A database error occurred".to_string()
            }
            AppError::Migration(ref e) => {
                tracing::error!(error = %e, "migration error");
                "A database error occurred".to_string()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            // 4xx 에러는 Display 메시지를 그대로 클라이언트에 보여줍니다.
            ref other => other.to_string(),
        };

        // 결과: { "error": { "code": "not_found", "message": "Card not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
