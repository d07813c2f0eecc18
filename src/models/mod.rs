//! # 데이터 모델 모듈
//!
//! 회고 보드에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `session`: 회고 세션과 세션 상세 응답
//! - `card`: 카드, 컬럼 종류, 카드 생성/수정/병합 요청
//! - `comment`: 카드에 달리는 코멘트
//!
//! 외부로 노출되는 식별자는 모두 UUID 문자열(`session_id`, `card_id`, `comment_id`)이며,
//! 테이블의 정수 행 id는 어떤 구조체에도 담지 않습니다.

pub mod card;
pub mod comment;
pub mod session;

pub use card::*;
pub use comment::*;
pub use session::*;
