//! # 카드 병합
//!
//! 중복된 카드 두 장을 하나로 합칩니다. `source` 카드가 `target` 카드에 흡수됩니다.
//!
//! ## 처리 흐름 (하나의 쓰기 트랜잭션, `BEGIN IMMEDIATE`)
//! ```text
//! 1. 두 카드 조회             → 없으면 NotFound
//! 2. 같은 카드인지 확인        → Validation
//! 3. 같은 세션인지 확인        → CrossSession
//! 4. 이미 흡수된 카드인지 확인  → AlreadyMerged
//! 5. target.text = trim(target.text) + 구분선 + trim(source.text)
//! 6. source의 코멘트를 모두 target으로 이동
//! 7. source.merged_into = target.card_id
//! 8. 커밋
//! ```
//!
//! 흡수된 카드는 다시 병합의 source나 target이 될 수 없으므로
//! 병합 사슬(A→B→C)이나 순환(A→B→A)은 생기지 않습니다.

use sqlx::SqlitePool;

use super::now_timestamp;
use crate::db;
use crate::error::AppError;
use crate::models::MergeResult;

/// 병합된 두 텍스트 사이에 들어가는 구분선
pub const MERGE_SEPARATOR: &str = "\n------------------\n";

/// 대상 텍스트 뒤에 흡수되는 텍스트를 붙입니다. 양쪽 다 앞뒤 공백을 제거합니다.
///
/// 순서가 중요합니다: `combine_text(a, b) != combine_text(b, a)`.
pub fn combine_text(target: &str, source: &str) -> String {
    format!("{}{}{}", target.trim(), MERGE_SEPARATOR, source.trim())
}

/// `source_card_id` 카드를 `target_card_id` 카드에 병합합니다.
///
/// 코멘트의 id, 작성자, 내용, 작성 시각은 그대로 두고 소속 카드만 바꿉니다.
/// source 카드의 text, author, column_type도 그대로 남습니다.
pub async fn merge_cards(
    pool: &SqlitePool,
    source_card_id: &str,
    target_card_id: &str,
) -> Result<MergeResult, AppError> {
    let mut tx = db::begin_write(pool).await?;

    let source = db::get_card(&mut *tx, source_card_id)
        .await?
        .ok_or(AppError::NotFound("Card"))?;
    let target = db::get_card(&mut *tx, target_card_id)
        .await?
        .ok_or(AppError::NotFound("Card"))?;

    if source.card_id == target.card_id {
        return Err(AppError::Validation(
            "a card cannot be merged into itself".to_string(),
        ));
    }
    if source.session_id != target.session_id {
        return Err(AppError::CrossSession);
    }
    if source.is_merged() {
        return Err(AppError::AlreadyMerged(source.card_id));
    }
    if target.is_merged() {
        return Err(AppError::AlreadyMerged(target.card_id));
    }

    let merged_text = combine_text(&target.text, &source.text);
    let now = now_timestamp();

    if !db::set_card_text(&mut *tx, &target.card_id, &merged_text, &now).await? {
        return Err(AppError::Internal(format!(
            "card {} vanished during merge",
            target.card_id
        )));
    }
    let moved = db::reassign_comments(&mut *tx, &source.card_id, &target.card_id).await?;
    if !db::mark_card_merged(&mut *tx, &source.card_id, &target.card_id, &now).await? {
        return Err(AppError::Internal(format!(
            "card {} vanished during merge",
            source.card_id
        )));
    }

    tx.commit().await?;

    tracing::info!(
        source = %source.card_id,
        target = %target.card_id,
        comments_moved = moved,
        "cards merged"
    );

    Ok(MergeResult {
        merged_card_id: source.card_id,
        into_card_id: target.card_id,
        merged_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnType, Comment};
    use crate::services::{self, test_support};
    use std::collections::HashSet;

    fn comment_ids(comments: &[Comment]) -> HashSet<String> {
        comments.iter().map(|c| c.comment_id.clone()).collect()
    }

    #[test]
    fn combine_text_trims_both_sides() {
        assert_eq!(
            combine_text("  first \n", "\tsecond  "),
            "first\n------------------\nsecond"
        );
    }

    #[test]
    fn combine_text_is_not_commutative() {
        assert_ne!(combine_text("a", "b"), combine_text("b", "a"));
    }

    #[tokio::test]
    async fn sprint_12_scenario() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let a = test_support::card(&pool, &session.session_id, "alice", "Deploys were smooth").await;
        let b = test_support::card(&pool, &session.session_id, "bob", "Deploys were smooth too").await;
        let carol = test_support::comment(&pool, &a.card_id, "carol", "+1").await;
        let dave = test_support::comment(&pool, &b.card_id, "dave", "same here").await;

        let result = merge_cards(&pool, &b.card_id, &a.card_id).await.unwrap();

        assert_eq!(result.merged_card_id, b.card_id);
        assert_eq!(result.into_card_id, a.card_id);
        assert_eq!(
            result.merged_text,
            "Deploys were smooth\n------------------\nDeploys were smooth too"
        );

        let detail = services::get_session(&pool, &session.session_id).await.unwrap();
        let card_a = detail.cards.iter().find(|c| c.card.card_id == a.card_id).unwrap();
        let card_b = detail.cards.iter().find(|c| c.card.card_id == b.card_id).unwrap();

        assert_eq!(card_a.card.text, result.merged_text);
        assert_eq!(
            comment_ids(&card_a.comments),
            HashSet::from([carol.comment_id.clone(), dave.comment_id.clone()])
        );
        assert!(card_b.comments.is_empty());
        assert_eq!(card_b.card.merged_into.as_deref(), Some(a.card_id.as_str()));
    }

    #[tokio::test]
    async fn merge_preserves_moved_comment_fields() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let target = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let source = test_support::card(&pool, &session.session_id, "bob", "B").await;
        let before = test_support::comment(&pool, &source.card_id, "erin", "context").await;

        merge_cards(&pool, &source.card_id, &target.card_id).await.unwrap();

        let after = db::get_comment(&pool, &before.comment_id).await.unwrap().unwrap();
        assert_eq!(after.card_id, target.card_id);
        assert_eq!(after.author, before.author);
        assert_eq!(after.text, before.text);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn merge_leaves_target_comments_untouched_and_unduplicated() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let target = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let source = test_support::card(&pool, &session.session_id, "bob", "B").await;
        let own = test_support::comment(&pool, &target.card_id, "carol", "mine").await;

        merge_cards(&pool, &source.card_id, &target.card_id).await.unwrap();

        let comments = db::list_comments_for_card(&pool, &target.card_id).await.unwrap();
        assert_eq!(comments, vec![own]);
    }

    #[tokio::test]
    async fn merge_keeps_source_content_and_marks_it() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let target = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let req = crate::models::CreateCardRequest {
            author: "bob".to_string(),
            column_type: "actions".to_string(),
            text: "  B  ".to_string(),
        };
        let source = services::create_card(&pool, &session.session_id, &req).await.unwrap();

        merge_cards(&pool, &source.card_id, &target.card_id).await.unwrap();

        let stored = db::get_card(&pool, &source.card_id).await.unwrap().unwrap();
        assert_eq!(stored.text, "  B  ");
        assert_eq!(stored.author, "bob");
        assert_eq!(stored.column_type, ColumnType::Actions);
        assert_eq!(stored.merged_into, Some(target.card_id.clone()));
        assert!(stored.updated_at >= source.updated_at);
    }

    #[tokio::test]
    async fn merge_direction_matters() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;

        let a1 = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let b1 = test_support::card(&pool, &session.session_id, "bob", "B").await;
        let into_a = merge_cards(&pool, &b1.card_id, &a1.card_id).await.unwrap();

        let a2 = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let b2 = test_support::card(&pool, &session.session_id, "bob", "B").await;
        let into_b = merge_cards(&pool, &a2.card_id, &b2.card_id).await.unwrap();

        assert_eq!(into_a.merged_text, "A\n------------------\nB");
        assert_eq!(into_b.merged_text, "B\n------------------\nA");
    }

    #[tokio::test]
    async fn merging_more_cards_into_one_target_accumulates_text() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let target = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let b = test_support::card(&pool, &session.session_id, "bob", "B").await;
        let c = test_support::card(&pool, &session.session_id, "carol", "C").await;

        merge_cards(&pool, &b.card_id, &target.card_id).await.unwrap();
        let result = merge_cards(&pool, &c.card_id, &target.card_id).await.unwrap();

        assert_eq!(
            result.merged_text,
            "A\n------------------\nB\n------------------\nC"
        );
    }

    #[tokio::test]
    async fn cross_session_merge_mutates_nothing() {
        let pool = test_support::pool().await;
        let first = test_support::session(&pool, "first").await;
        let second = test_support::session(&pool, "second").await;
        let a = test_support::card(&pool, &first.session_id, "alice", "A").await;
        let b = test_support::card(&pool, &second.session_id, "bob", "B").await;
        let comment = test_support::comment(&pool, &b.card_id, "carol", "+1").await;

        let err = merge_cards(&pool, &b.card_id, &a.card_id).await.unwrap_err();
        assert!(matches!(err, AppError::CrossSession));

        assert_eq!(db::get_card(&pool, &a.card_id).await.unwrap(), Some(a));
        assert_eq!(db::get_card(&pool, &b.card_id).await.unwrap(), Some(b));
        assert_eq!(db::get_comment(&pool, &comment.comment_id).await.unwrap(), Some(comment));
    }

    #[tokio::test]
    async fn merge_with_missing_card_is_not_found() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let a = test_support::card(&pool, &session.session_id, "alice", "A").await;

        for (source, target) in [(a.card_id.as_str(), "missing"), ("missing", a.card_id.as_str())] {
            let err = merge_cards(&pool, source, target).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound("Card")));
        }
        assert_eq!(db::get_card(&pool, &a.card_id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn self_merge_is_rejected() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let a = test_support::card(&pool, &session.session_id, "alice", "A").await;

        let err = merge_cards(&pool, &a.card_id, &a.card_id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(db::get_card(&pool, &a.card_id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn absorbed_source_cannot_be_merged_again() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let a = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let b = test_support::card(&pool, &session.session_id, "bob", "B").await;
        merge_cards(&pool, &b.card_id, &a.card_id).await.unwrap();
        let a_after_first = db::get_card(&pool, &a.card_id).await.unwrap();

        let err = merge_cards(&pool, &b.card_id, &a.card_id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyMerged(id) if id == b.card_id));
        assert_eq!(db::get_card(&pool, &a.card_id).await.unwrap(), a_after_first);
    }

    #[tokio::test]
    async fn merge_into_absorbed_target_is_rejected() {
        let pool = test_support::pool().await;
        let session = test_support::session(&pool, "Sprint 12").await;
        let a = test_support::card(&pool, &session.session_id, "alice", "A").await;
        let b = test_support::card(&pool, &session.session_id, "bob", "B").await;
        let c = test_support::card(&pool, &session.session_id, "carol", "C").await;
        merge_cards(&pool, &b.card_id, &a.card_id).await.unwrap();

        let err = merge_cards(&pool, &c.card_id, &b.card_id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyMerged(id) if id == b.card_id));

        // 순환 시도 (A → B, 이미 B → A)
        let err = merge_cards(&pool, &a.card_id, &b.card_id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyMerged(_)));
        assert!(db::get_card(&pool, &c.card_id).await.unwrap().unwrap().merged_into.is_none());
    }
}
