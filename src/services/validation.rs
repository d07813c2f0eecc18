//! 입력 검증 규칙
//!
//! 길이는 바이트가 아니라 문자(`char`) 수로 셉니다. 공백만 있는 값은 빈 값으로 취급합니다.
//! 검증을 통과한 값은 다듬지 않고 입력 그대로 저장됩니다.

use crate::error::AppError;

pub const MAX_SESSION_NAME_CHARS: usize = 100;
pub const MAX_AUTHOR_CHARS: usize = 100;
pub const MAX_CARD_TEXT_CHARS: usize = 500;
pub const MAX_COMMENT_TEXT_CHARS: usize = 300;

/// 비어 있지 않고 `max_chars` 이하인지 확인합니다.
pub fn require_text<'a>(field: &str, value: &'a str, max_chars: usize) -> Result<&'a str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }

    let len = value.chars().count();
    if len > max_chars {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_chars} characters (got {len})"
        )));
    }

    Ok(value)
}
