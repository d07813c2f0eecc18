//! # retro: OpenRetro CLI 클라이언트
//!
//! 실행 중인 OpenRetro 서버의 HTTP API를 호출합니다. 에이전트나 스크립트가
//! 브라우저 없이 카드를 추가하고 병합할 때 사용합니다.
//!
//! ```text
//! retro new-session --name "Sprint 12"
//! retro add --session <id> --column good --text "Deploys were smooth" --author alice
//! retro comment --card <id> --text "+1" --author carol
//! retro merge --card <source-id> --into <target-id>
//! retro list --session <id>
//! retro delete --card <id>
//! ```
//!
//! 서버 주소는 `--api-url` 또는 `OPENRETRO_API_URL` 환경변수로 지정합니다.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use openretro::models::{
    CardDetail, Comment, CreateCardRequest, CreateCommentRequest, CreateSessionRequest,
    MergeCardRequest, MergeResult, SessionDetail,
};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

const DEFAULT_API_URL: &str = "http://localhost:9982/api";

#[derive(Debug, Parser)]
#[command(name = "retro")]
#[command(about = "OpenRetro CLI tool for agents", long_about = None)]
struct Cli {
    /// API 기본 주소 (예: http://localhost:9982/api)
    #[arg(long, global = true, env = "OPENRETRO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a new retrospective session.
    NewSession {
        #[arg(long)]
        name: String,
    },
    /// Add a new card to a session.
    Add {
        #[arg(long)]
        session: String,
        #[arg(long, value_parser = ["good", "better", "actions"])]
        column: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        author: String,
    },
    /// Merge one card into another.
    Merge {
        #[arg(long)]
        card: String,
        #[arg(long)]
        into: String,
    },
    /// Add a comment to a card.
    Comment {
        #[arg(long)]
        card: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        author: String,
    },
    /// Print a session with all its cards and comments.
    List {
        #[arg(long)]
        session: String,
    },
    /// Delete a card and its comments.
    Delete {
        #[arg(long)]
        card: String,
    },
}

/// 서버 API를 호출하는 얇은 HTTP 클라이언트
struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 요청을 보내고 성공 응답을 `T`로 파싱합니다.
    async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response from {path}"))
    }

    /// 본문이 없는 응답(204 No Content)을 기대하는 요청
    async fn call_no_content(&self, method: Method, path: &str) -> Result<()> {
        self.send::<()>(method, path, None).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Connection to {url} failed. Is the API running at {}?", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("HTTP error {}: {}", status, error_message(status, &text));
        }

        Ok(response)
    }
}

/// 서버 에러 본문 `{ "error": { "message": ... } }`에서 메시지를 꺼냅니다.
/// 형식이 다르면 본문을 그대로 씁니다.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.to_string()
            }
        })
}

async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(&cli.api_url);

    match cli.command {
        Commands::NewSession { name } => {
            let session: SessionDetail = client
                .call(Method::POST, "sessions", Some(&CreateSessionRequest { name }))
                .await?;
            println!("Session created: {}", session.session.session_id);
        }
        Commands::Add {
            session,
            column,
            text,
            author,
        } => {
            let req = CreateCardRequest {
                author,
                column_type: column,
                text,
            };
            let card: CardDetail = client
                .call(Method::POST, &format!("sessions/{session}/cards"), Some(&req))
                .await?;
            println!("Card added: {}", card.card.card_id);
        }
        Commands::Merge { card, into } => {
            let req = MergeCardRequest { into_card_id: into };
            let result: MergeResult = client
                .call(Method::POST, &format!("cards/{card}/merge"), Some(&req))
                .await?;
            println!(
                "Cards merged. Merged card: {} into {}",
                result.merged_card_id, result.into_card_id
            );
        }
        Commands::Comment { card, text, author } => {
            let req = CreateCommentRequest { author, text };
            let comment: Comment = client
                .call(Method::POST, &format!("cards/{card}/comments"), Some(&req))
                .await?;
            println!("Comment added: {}", comment.comment_id);
        }
        Commands::List { session } => {
            let detail: serde_json::Value = client
                .call::<(), _>(Method::GET, &format!("sessions/{session}"), None)
                .await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Commands::Delete { card } => {
            client
                .call_no_content(Method::DELETE, &format!("cards/{card}"))
                .await?;
            println!("Card deleted: {card}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}
