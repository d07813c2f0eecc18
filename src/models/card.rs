//! # 카드 모델 정의
//!
//! 카드는 회고 보드의 메모 한 장입니다. 세 컬럼(good / better / actions) 중 하나에 속하고,
//! 다른 카드에 병합되면 `merged_into`에 대상 카드의 id가 기록됩니다.
//!
//! ## 구조체 역할
//! - `Card`: DB에 저장된 카드 (응답용)
//! - `ColumnType`: 허용되는 컬럼 세 가지
//! - `CreateCardRequest` / `UpdateCardRequest`: 생성과 부분 수정 요청
//! - `MergeCardRequest` / `MergeResult`: 병합 요청과 결과

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 카드가 속하는 컬럼
///
/// DB에는 소문자 문자열("good", "better", "actions")로 저장됩니다.
/// `sqlx::Type` derive가 문자열 ↔ enum 변환을 처리하고,
/// 스키마의 CHECK 제약이 다른 값의 저장을 막습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ColumnType {
    Good,
    Better,
    Actions,
}

impl ColumnType {
    pub const ALL: [ColumnType; 3] = [ColumnType::Good, ColumnType::Better, ColumnType::Actions];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Good => "good",
            ColumnType::Better => "better",
            ColumnType::Actions => "actions",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = AppError;

    /// 정확히 일치하는 소문자 리터럴만 허용합니다. ("Good", " good" 등은 거부)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "column_type must be one of good, better, actions (got {s:?})"
                ))
            })
    }
}

/// 카드 엔티티: DB의 `cards` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    /// 카드 고유 식별자 (UUIDv7). 병합된 뒤에도 바뀌지 않습니다.
    pub card_id: String,
    /// 카드가 속한 세션: 생성 후 바뀌지 않습니다.
    pub session_id: String,
    pub author: String,
    pub column_type: ColumnType,
    pub text: String,
    /// 컬럼 안에서의 정렬 순서 (기본값 0)
    pub position: i64,
    /// 이 카드를 흡수한 카드의 id. None이면 활성 카드입니다.
    pub merged_into: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Card {
    /// 다른 카드에 흡수되었는지 여부
    pub fn is_merged(&self) -> bool {
        self.merged_into.is_some()
    }
}

/// 카드 생성 요청: `POST /api/sessions/{id}/cards`
///
/// `column_type`을 문자열로 받는 이유: 허용되지 않은 값이 JSON 파싱 단계가 아니라
/// 검증 단계에서 `AppError::Validation`으로 거부되도록 하기 위함입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub author: String,
    pub column_type: String,
    pub text: String,
}

/// 카드 수정 요청: `PUT /api/cards/{id}`
///
/// 부분 수정(sparse patch): 요청에 있는 필드만 바뀌고 빠진 필드는 그대로 유지됩니다.
/// JSON `null`도 "변경 안 함"으로 취급합니다. 세 필드 모두 비울(clear) 수 없습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

/// 카드 병합 요청: `POST /api/cards/{id}/merge`
///
/// 경로의 `{id}` 카드가 `into_card_id` 카드에 흡수됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeCardRequest {
    pub into_card_id: String,
}

/// 병합 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// 흡수된(source) 카드 id
    pub merged_card_id: String,
    /// 흡수한(target) 카드 id
    pub into_card_id: String,
    /// 병합 후 대상 카드의 텍스트
    pub merged_text: String,
}
