//! # OpenRetro
//!
//! 회고(retrospective) 보드 서비스입니다. 세션 안에 good / better / actions 세 컬럼의
//! 카드가 있고, 카드에는 코멘트가 달리며, 중복된 카드는 병합할 수 있습니다.
//!
//! ## 계층 구조
//! ```text
//! routes (axum 핸들러)  ─┐
//! bin/retro (CLI, HTTP) ─┴→ services (검증 + 트랜잭션) → db (sqlx 쿼리) → SQLite
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use routes::{app, AppState};
