//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok" }`
//!
//! 컨테이너 오케스트레이터나 CLI가 서버가 떠 있는지 확인할 때 사용합니다.

use axum::Json;                // JSON 응답 래퍼
use serde_json::{json, Value}; // json! 매크로와 동적 JSON 값 타입

/// `GET /api/health`: 서버 상태를 확인합니다.
///
/// 추출기(State, Path 등) 없이 고정된 JSON만 반환합니다.
/// DB에 접근하지 않으므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    // 결과: {"status": "ok"}
    Json(json!({
        "status": "ok"
    }))
}
