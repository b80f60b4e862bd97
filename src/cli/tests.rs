use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use httpmock::MockServer;
use serde_json::json;
use tempfile::TempDir;
use url::Url;

use super::*;
use crate::application::messages;
use crate::application::notice::NoticeTiming;
use crate::application::ports::ApiError;
use crate::config::{
    AuthSettings, BackendSettings, DeleteArgs, EditArgs, LogFormat, LoggingSettings, PublishArgs,
    TokenAction, TokenArgs,
};
use crate::domain::posts::{Post, PostFields, PostId};
use tracing::level_filters::LevelFilter;

fn settings(server: &MockServer, dir: &TempDir) -> Settings {
    Settings {
        backend: BackendSettings {
            base_url: Url::parse(&server.base_url()).expect("base url"),
            timeout: Duration::from_secs(5),
        },
        auth: AuthSettings {
            token_store: dir.path().join("storage.json"),
            token_key: "token".into(),
        },
        notice: NoticeTiming::default(),
        logging: LoggingSettings {
            level: LevelFilter::OFF,
            format: LogFormat::Compact,
        },
    }
}

fn ctx(server: &MockServer, dir: &TempDir) -> Ctx {
    let ctx = Ctx::from_settings(settings(server, dir)).expect("ctx");
    ctx.tokens.set("tok").expect("store token");
    ctx
}

fn id(value: &str) -> PostId {
    PostId::new(value).expect("id")
}

#[tokio::test]
async fn edit_fetches_missing_fields_then_updates() -> Result<(), AppError> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    let fetch = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/v1/blog/42")
                .header("authorization", "tok");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"title":"Hi","content":"World"}"#);
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method("PUT")
                .path("/api/v1/blog/update/42")
                .header("authorization", "tok")
                .json_body(json!({"title": "Hi", "content": "World"}));
            then.status(200);
        })
        .await;

    let route = edit(
        &ctx(&server, &dir),
        EditArgs {
            id: "42".into(),
            title: None,
            content: None,
            content_file: None,
        },
    )
    .await?;

    assert_eq!(route, Route::PostDetail(id("42")));
    assert_eq!(route.path(), "/blog/42");
    fetch.assert_async().await;
    update.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn edit_with_full_fields_skips_fetch() -> Result<(), AppError> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    // Would turn the edit into a rejection if it were ever called.
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/v1/blog/7");
            then.status(500);
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method("PUT")
                .path("/api/v1/blog/update/7")
                .json_body(json!({"title": "New", "content": "Body"}));
            then.status(200);
        })
        .await;

    let route = edit(
        &ctx(&server, &dir),
        EditArgs {
            id: "7".into(),
            title: Some("New".into()),
            content: Some("Body".into()),
            content_file: None,
        },
    )
    .await?;

    assert_eq!(route, Route::PostDetail(id("7")));
    update.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn edit_stops_when_fetch_fails() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/v1/blog/42");
            then.status(500).body("db down");
        })
        .await;

    let err = edit(
        &ctx(&server, &dir),
        EditArgs {
            id: "42".into(),
            title: None,
            content: None,
            content_file: None,
        },
    )
    .await
    .expect_err("fetch failure");

    assert_eq!(err.to_string(), messages::FETCH_FAILED);
}

#[tokio::test]
async fn edit_denied_surfaces_access_message() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    server
        .mock_async(|when, then| {
            when.method("PUT").path("/api/v1/blog/update/7");
            then.status(403);
        })
        .await;

    let err = edit(
        &ctx(&server, &dir),
        EditArgs {
            id: "7".into(),
            title: Some("T".into()),
            content: Some("C".into()),
            content_file: None,
        },
    )
    .await
    .expect_err("forbidden");

    assert_eq!(err.to_string(), messages::UPDATE_DENIED);
}

#[tokio::test]
async fn delete_with_yes_navigates_to_listing() -> Result<(), AppError> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    let mock = server
        .mock_async(|when, then| {
            when.method("DELETE")
                .path("/api/v1/blog/delete/42")
                .header("authorization", "tok");
            then.status(200);
        })
        .await;

    let route = delete(
        &ctx(&server, &dir),
        DeleteArgs {
            id: "42".into(),
            yes: true,
        },
        &mut Cursor::new(""),
    )
    .await?;

    assert_eq!(route, Route::PostListing);
    mock.assert_async().await;
    Ok(())
}

#[derive(Default)]
struct CountingApi {
    calls: AtomicUsize,
}

impl CountingApi {
    fn bump(&self) -> ApiError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ApiError::NotFound
    }
}

#[async_trait]
impl BlogApi for CountingApi {
    async fn fetch_post(&self, _id: &PostId) -> Result<Post, ApiError> {
        Err(self.bump())
    }

    async fn create_post(&self, _fields: &PostFields) -> Result<PostId, ApiError> {
        Err(self.bump())
    }

    async fn update_post(&self, _id: &PostId, _fields: &PostFields) -> Result<(), ApiError> {
        Err(self.bump())
    }

    async fn delete_post(&self, _id: &PostId) -> Result<(), ApiError> {
        Err(self.bump())
    }
}

#[tokio::test]
async fn delete_declined_makes_no_request() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    let api = Arc::new(CountingApi::default());
    let ctx = Ctx {
        api: api.clone(),
        ..ctx(&server, &dir)
    };

    let err = delete(
        &ctx,
        DeleteArgs {
            id: "42".into(),
            yes: false,
        },
        &mut Cursor::new("n\n"),
    )
    .await
    .expect_err("declined");

    assert!(matches!(err, AppError::Cancelled));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn delete_confirmed_on_prompt() -> Result<(), AppError> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    let mock = server
        .mock_async(|when, then| {
            when.method("DELETE").path("/api/v1/blog/delete/9");
            then.status(204);
        })
        .await;

    let route = delete(
        &ctx(&server, &dir),
        DeleteArgs {
            id: "9".into(),
            yes: false,
        },
        &mut Cursor::new("y\n"),
    )
    .await?;

    assert_eq!(route, Route::PostListing);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn publish_navigates_to_created_post() -> Result<(), AppError> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    let mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/api/v1/blog/create")
                .json_body(json!({"title": "T", "content": "C"}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"abc-1"}"#);
        })
        .await;

    let route = publish(
        &ctx(&server, &dir),
        PublishArgs {
            title: Some("T".into()),
            content: Some("C".into()),
            content_file: None,
        },
    )
    .await?;

    assert_eq!(route, Route::PostDetail(id("abc-1")));
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn publish_without_content_is_rejected_locally() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");

    let err = publish(
        &ctx(&server, &dir),
        PublishArgs {
            title: Some("T".into()),
            content: None,
            content_file: None,
        },
    )
    .await
    .expect_err("validation");

    assert_eq!(err.to_string(), messages::PUBLISH_MISSING_FIELDS);
}

#[tokio::test]
async fn publish_failure_reports_alert() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().expect("tmp dir");
    server
        .mock_async(|when, then| {
            when.method("POST").path("/api/v1/blog/create");
            then.status(500);
        })
        .await;

    let err = publish(
        &ctx(&server, &dir),
        PublishArgs {
            title: Some("T".into()),
            content: Some("C".into()),
            content_file: None,
        },
    )
    .await
    .expect_err("create failure");

    assert_eq!(err.to_string(), messages::PUBLISH_FAILED);
}

#[test]
fn token_set_show_clear() -> Result<(), AppError> {
    let server = MockServer::start();
    let dir = TempDir::new().expect("tmp dir");
    let ctx = Ctx::from_settings(settings(&server, &dir))?;

    token(
        &ctx,
        TokenArgs {
            action: TokenAction::Set {
                value: " fresh \n".into(),
            },
        },
    )?;
    assert_eq!(ctx.tokens.get()?.as_deref(), Some("fresh"));

    token(
        &ctx,
        TokenArgs {
            action: TokenAction::Clear,
        },
    )?;
    let err = token(
        &ctx,
        TokenArgs {
            action: TokenAction::Show,
        },
    )
    .expect_err("no token");
    assert!(matches!(err, AppError::Rejected(_)));
    Ok(())
}
