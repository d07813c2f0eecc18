//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! SQLite와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)이 트랜잭션을 열고, 이 모듈의 함수에 `&mut *tx`를 넘겨
//! 여러 쿼리를 하나의 원자적 작업으로 묶습니다.
//!
//! 각 하위 모듈:
//! - `sessions`: 세션 CRUD 쿼리
//! - `cards`: 카드 CRUD 및 병합 표시 쿼리
//! - `comments`: 코멘트 추가/조회 및 소속 카드 변경 쿼리
//!
//! ## 쓰기 트랜잭션
//! 읽은 뒤 쓰는 작업은 `begin_write`로 시작합니다. `BEGIN IMMEDIATE`가 처음부터 쓰기 잠금을
//! 잡으므로, 동시에 들어온 다른 쓰기는 `busy_timeout` 동안 기다렸다가 차례로 실행됩니다.
//! 일반 `BEGIN`(deferred)은 읽기 스냅샷을 쥔 채 쓰기 잠금으로 올라가려다
//! 대기 없이 곧바로 `SQLITE_BUSY`로 실패합니다.
//!
//! ## 실행기(Executor)
//! 단일 쿼리 함수는 `impl SqliteExecutor<'_>`를 받습니다.
//! `&SqlitePool`(풀에서 연결을 빌려 자동 커밋)과 `&mut SqliteConnection`(트랜잭션 안)
//! 둘 다 넘길 수 있습니다.

pub mod cards;
pub mod comments;
pub mod sessions;

pub use cards::*;
pub use comments::*;
pub use sessions::*;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::config::Config;
use crate::error::AppError;

/// 설정에 따라 SQLite 연결 풀을 만들고 마이그레이션을 실행합니다.
///
/// - `foreign_keys(true)`: SQLite는 기본적으로 외래키를 검사하지 않으므로 연결마다 켭니다.
/// - WAL 저널: 읽기와 쓰기가 서로를 막지 않습니다.
/// - `busy_timeout`: 다른 연결이 쓰기 잠금을 잡고 있으면 이 시간만큼 기다린 뒤 실패합니다.
///
/// 메모리 DB URL(`sqlite::memory:`, `mode=memory`)이면 `connect_in_memory`로 넘깁니다.
pub async fn connect(config: &Config) -> Result<SqlitePool, AppError> {
    if is_in_memory_url(&config.database_url) {
        tracing::warn!("In-memory database requested; data will be lost on shutdown");
        return connect_in_memory().await;
    }

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    // 파일 DB라면 상위 디렉토리가 있어야 SQLite가 파일을 만들 수 있습니다.
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !Path::new(parent).exists() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create database directory: {e}")))?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// 메모리 DB 풀을 만듭니다. 테스트와 일회성 실행용입니다.
///
/// 메모리 DB는 연결마다 따로 존재하므로 연결 하나만 유지하고, 그 연결이 닫히지 않게 합니다.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// 쓰기 잠금을 먼저 잡는 트랜잭션(`BEGIN IMMEDIATE`)을 시작합니다.
///
/// 잠금을 못 잡으면 `busy_timeout`만큼 기다린 뒤 `AppError::Database`로 실패합니다.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

fn is_in_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// `./migrations` 폴더의 SQL 파일을 아직 적용되지 않은 것만 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::Session;

    #[test]
    fn recognizes_in_memory_urls() {
        assert!(is_in_memory_url("sqlite::memory:"));
        assert!(is_in_memory_url("sqlite://file:board?mode=memory&cache=shared"));
        assert!(!is_in_memory_url("sqlite:data/openretro.db"));
    }

    #[tokio::test]
    async fn memory_url_keeps_one_migrated_database() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 5,
            ..Config::default()
        };
        let pool = connect(&config).await.unwrap();

        let session = Session {
            session_id: "s1".to_string(),
            name: "Sprint 12".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        db::insert_session(&pool, &session).await.unwrap();

        for _ in 0..10 {
            assert_eq!(db::get_session(&pool, "s1").await.unwrap(), Some(session.clone()));
        }
    }

    #[tokio::test]
    async fn write_transaction_rolls_back_on_drop() {
        let pool = connect_in_memory().await.unwrap();
        let session = Session {
            session_id: "s1".to_string(),
            name: "Sprint 12".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };

        {
            let mut tx = begin_write(&pool).await.unwrap();
            db::insert_session(&mut *tx, &session).await.unwrap();
        }

        assert!(db::get_session(&pool, "s1").await.unwrap().is_none());
    }
}
