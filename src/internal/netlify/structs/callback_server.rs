//! 隐式授权的本地回调服务
//!
//! 授权完成后浏览器跳转到 `/callback.html#access_token=...`。片段不会发给服务端，
//! 所以回调页用一小段脚本把片段改写成查询串，再跳转到 `/callback?access_token=...`。

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use url::Url;

use crate::internal::netlify::constants::AUTHORIZE_ENDPOINT;

use super::auth_error::AuthError;

const CALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Netlify</title></head>
<body>
<script>
  const params = new URLSearchParams(window.location.hash.slice(1));
  window.location.replace("/callback?" + params.toString());
</script>
</body>
</html>
"#;

type TokenSender = Arc<Mutex<Option<oneshot::Sender<Option<String>>>>>;

#[derive(Deserialize)]
struct CallbackQuery {
    access_token: Option<String>,
}

pub struct CallbackServer {
    addr: SocketAddr,
    token_rx: oneshot::Receiver<Option<String>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl CallbackServer {
    /// 在 `127.0.0.1:port` 上启动回调服务；`port` 为 0 时由系统分配。
    pub async fn bind(port: u16) -> Result<Self, AuthError> {
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .map_err(|source| AuthError::Bind { port, source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| AuthError::Bind { port, source })?;

        let (token_tx, token_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let router = Router::new()
            .route("/callback.html", get(callback_page))
            .route("/callback", get(callback))
            .with_state(Arc::new(Mutex::new(Some(token_tx))));

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::warn!("回调服务异常退出: {e}");
            }
        });

        tracing::debug!(%addr, "回调服务已启动");
        Ok(Self {
            addr,
            token_rx,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// 授权完成后浏览器跳转的地址。
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/callback.html", self.addr.port())
    }

    /// 隐式授权页地址。
    pub fn authorize_url(&self, client_id: &str) -> Result<Url, AuthError> {
        let redirect_uri = self.redirect_uri();
        Url::parse_with_params(
            AUTHORIZE_ENDPOINT,
            &[
                ("response_type", "token"),
                ("client_id", client_id),
                ("redirect_uri", redirect_uri.as_str()),
            ],
        )
        .map_err(AuthError::AuthorizeUrl)
    }

    /// 等待回调带回令牌，超时或回调缺少令牌时返回错误；无论结果如何都会关闭服务。
    pub async fn wait_for_token(
        mut self,
        timeout: Duration,
    ) -> Result<String, AuthError> {
        let received =
            tokio::time::timeout(timeout, &mut self.token_rx).await;
        self.shutdown().await;

        match received {
            Err(_) => Err(AuthError::Timeout(timeout)),
            Ok(Err(_)) => Err(AuthError::ServerClosed),
            Ok(Ok(None)) => Err(AuthError::MissingToken),
            Ok(Ok(Some(token))) => Ok(token),
        }
    }

    async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            tracing::warn!("回调服务任务异常: {e}");
        }
    }
}

async fn callback_page() -> Html<&'static str> {
    Html(CALLBACK_PAGE)
}

async fn callback(
    State(sender): State<TokenSender>,
    Query(query): Query<CallbackQuery>,
) -> Html<&'static str> {
    let token = query.access_token.filter(|t| !t.is_empty());
    let ok = token.is_some();

    // 只接受第一次回调
    if let Some(tx) = sender.lock().await.take() {
        let _ = tx.send(token);
    }

    if ok {
        Html("认证成功，可以关闭此窗口。")
    } else {
        Html("认证失败，请重试。")
    }
}
