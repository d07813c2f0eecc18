//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목 (모두 기본값이 있어 환경변수 없이도 동작합니다):
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (기본값: "sqlite:data/openretro.db")
//! - `HOST`: 서버 바인딩 주소 (기본값: "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값: 9982)
//! - `STATIC_DIR`: 프론트엔드 정적 파일 디렉토리 (기본값: "frontend")
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 크기 (기본값: 5)
//! - `DB_BUSY_TIMEOUT_SECS`: 쓰기 잠금 대기 시간(초) (기본값: 5)

use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/openretro.db";
pub const DEFAULT_PORT: u16 = 9982;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/openretro.db", "sqlite::memory:")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    /// 서버 포트 번호
    pub port: u16,
    /// 빌드된 프론트엔드 파일이 있는 디렉토리. 없으면 API만 서빙합니다.
    pub static_dir: String,
    /// SQLite 연결 풀의 최대 연결 수
    pub max_connections: u32,
    /// 다른 연결이 쓰기 잠금을 잡고 있을 때 기다리는 최대 시간(초)
    pub busy_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: "frontend".to_string(),
            max_connections: 5,
            busy_timeout_secs: 5,
        }
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 값이 없거나 숫자 파싱에 실패하면 기본값을 사용합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 구성합니다. 테스트에서 환경변수 대신 사용합니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(lookup("PORT"), defaults.port),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), defaults.max_connections),
            busy_timeout_secs: parse_or(lookup("DB_BUSY_TIMEOUT_SECS"), defaults.busy_timeout_secs),
        }
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 9982);
        assert_eq!(config.bind_addr(), "0.0.0.0:9982");
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "2"),
        ]));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
