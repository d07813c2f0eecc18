//! # 비즈니스 로직 모듈
//!
//! 라우트 핸들러와 CLI가 호출하는 회고 보드의 핵심 작업들입니다.
//! 각 작업은 입력을 먼저 검증하고, 저장소 작업은 하나의 트랜잭션으로 실행합니다.
//!
//! - `sessions`: 세션 생성/조회/삭제
//! - `cards`: 카드 생성/부분 수정/삭제
//! - `merge`: 카드 병합 (텍스트 결합, 코멘트 이동, 흡수 표시)
//! - `comments`: 코멘트 추가
//! - `validation`: 길이/빈 값 검사
//!
//! 식별자와 시각은 저장소 기본값에 맡기지 않고 여기서 직접 만듭니다.

pub mod cards;
pub mod comments;
pub mod merge;
pub mod sessions;
pub mod validation;

pub use cards::*;
pub use comments::*;
pub use merge::*;
pub use sessions::*;

use chrono::{SecondsFormat, Utc};

/// 새 엔티티 식별자 (UUIDv7, 생성 순서대로 정렬됩니다)
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// 현재 UTC 시각을 밀리초 단위 RFC 3339 문자열로 반환합니다. (예: "2026-10-16T09:30:00.123Z")
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
