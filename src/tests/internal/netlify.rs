//! Netlify 接入测试：认证头、清单拉取、文件流、异常状态、本地授权回调。
//!
//! 用 httpmock 在本地模拟 API，不访问真实服务。

use std::time::Duration;

use futures_util::StreamExt;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use crate::fetcher::{FetchError, FileSource};
use crate::netlify::constants::RAW_FILE_CONTENT_TYPE;
use crate::netlify::functions::list_site_files;
use crate::netlify::structs::{
    AuthError, CallbackServer, ManifestFetchError, NetlifyAuth, NetlifyFileSource,
};
use crate::scheduler::SchedulerConfig;
use crate::site_file::ManifestEntry;
use crate::{prepare_site_download, SiteDownloadParams};

fn auth_for(server: &MockServer) -> NetlifyAuth {
    NetlifyAuth::with_api_base("tok-123", &server.url("/api/v1")).unwrap()
}

#[test]
fn auth_hides_token_and_compares_by_fingerprint() {
    let a = NetlifyAuth::new("secret-token").unwrap();
    let b = NetlifyAuth::with_api_base("secret-token", "http://localhost:1/api").unwrap();
    let c = NetlifyAuth::new("other-token").unwrap();

    assert!(!format!("{a:?}").contains("secret-token"));
    assert!(a.eq_only_token(&b));
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(b.api_base.as_str(), "http://localhost:1/api/");
    assert!(matches!(NetlifyAuth::new("  "), Err(AuthError::EmptyToken)));
}

#[test]
fn file_url_encodes_each_segment() {
    let auth = NetlifyAuth::with_api_base("t", "https://api.example.com/api/v1/").unwrap();
    let source = NetlifyFileSource::new(auth, "site-1");

    let url = source.file_url("/img/my file#1.png").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/api/v1/sites/site-1/files/img/my%20file%231.png"
    );
}

#[tokio::test]
async fn list_site_files_sends_bearer_and_parses_records() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/sites/site-1/files")
                .header("authorization", "Bearer tok-123");
            then.status(200).json_body(json!([
                {"id": "a", "path": "/index.html", "sha": "x", "size": 12},
                {"id": "b", "path": "/css/site.css", "size": 5}
            ]));
        })
        .await;

    let entries = list_site_files(&auth_for(&server), "site-1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        entries,
        vec![
            ManifestEntry::new("/index.html", 12),
            ManifestEntry::new("/css/site.css", 5),
        ]
    );
}

#[tokio::test]
async fn list_site_files_reports_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/sites/site-1/files");
            then.status(401).body("unauthorized");
        })
        .await;

    let err = list_site_files(&auth_for(&server), "site-1").await.unwrap_err();
    match err {
        ManifestFetchError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("预期 Status，得到 {other:?}"),
    }
}

#[tokio::test]
async fn file_source_streams_body_with_raw_content_type() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/sites/site-1/files/css/site.css")
                .header("authorization", "Bearer tok-123")
                .header("content-type", RAW_FILE_CONTENT_TYPE);
            then.status(200).body("body{}");
        })
        .await;

    let source = NetlifyFileSource::new(auth_for(&server), "site-1");
    let mut stream = source.open("/css/site.css").await.unwrap();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk.unwrap());
    }

    mock.assert_async().await;
    assert_eq!(body, b"body{}");
}

#[tokio::test]
async fn file_source_maps_non_success_to_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/sites/site-1/files/gone.txt");
            then.status(404);
        })
        .await;

    let source = NetlifyFileSource::new(auth_for(&server), "site-1");
    let err = match source.open("gone.txt").await {
        Err(e) => e,
        Ok(_) => panic!("预期失败"),
    };
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn prepared_download_fetches_every_listed_file() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/sites/site-1/files");
            then.status(200).json_body(json!([
                {"path": "/index.html", "size": 5},
                {"path": "/js/app.js", "size": 3}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/sites/site-1/files/index.html");
            then.status(200).body("hello");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/sites/site-1/files/js/app.js");
            then.status(200).body("a()");
        })
        .await;

    let tmp = TempDir::new().unwrap();
    let orchestrator = prepare_site_download(
        &auth_for(&server),
        SiteDownloadParams {
            site_id: "site-1".to_string(),
            downloads_root: tmp.path().to_path_buf(),
            scheduler: SchedulerConfig {
                inter_batch_delay: Duration::ZERO,
                ..Default::default()
            },
        },
    )
    .await
    .unwrap();
    assert_eq!(orchestrator.manifest().len(), 2);

    let summary = orchestrator.run().await.unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.total_bytes_received, 8);
    let site_dir = tmp.path().join("site-1");
    assert_eq!(std::fs::read_to_string(site_dir.join("index.html")).unwrap(), "hello");
    assert_eq!(std::fs::read_to_string(site_dir.join("js/app.js")).unwrap(), "a()");
}

#[tokio::test]
async fn callback_server_serves_page_and_returns_token() {
    let server = CallbackServer::bind(0).await.unwrap();
    let port = server.local_addr().port();
    assert_eq!(
        server.redirect_uri(),
        format!("http://localhost:{port}/callback.html")
    );

    let authorize_url = server.authorize_url("client-9").unwrap();
    let query = authorize_url.query().unwrap();
    assert!(query.contains("response_type=token"));
    assert!(query.contains("client_id=client-9"));

    let page = reqwest::get(format!("http://127.0.0.1:{port}/callback.html"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("/callback?"));

    let reply = reqwest::get(format!("http://127.0.0.1:{port}/callback?access_token=abc&token_type=Bearer"))
        .await
        .unwrap();
    assert!(reply.status().is_success());

    let token = server.wait_for_token(Duration::from_secs(5)).await.unwrap();
    assert_eq!(token, "abc");
}

#[tokio::test]
async fn callback_without_token_fails() {
    let server = CallbackServer::bind(0).await.unwrap();
    let port = server.local_addr().port();

    reqwest::get(format!("http://127.0.0.1:{port}/callback?error=access_denied"))
        .await
        .unwrap();

    let err = server.wait_for_token(Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingToken));
}

#[tokio::test]
async fn callback_wait_times_out() {
    let server = CallbackServer::bind(0).await.unwrap();
    let err = server
        .wait_for_token(Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Timeout(_)));
}
