use std::process::{Command, Stdio};
use std::time::Duration;

use crate::internal::netlify::structs::{AuthError, CallbackServer};

/// 走隐式授权拿到令牌
///
/// 启动本地回调服务，打开浏览器让用户点击授权，等待回调带回 `access_token`。
/// 打不开浏览器时把授权地址打到日志里，由用户手动打开。
pub async fn authorize(
    client_id: &str,
    port: u16,
    timeout: Duration,
) -> Result<String, AuthError> {
    let client_id = client_id.trim();
    if client_id.is_empty() {
        return Err(AuthError::EmptyClientId);
    }

    let server = CallbackServer::bind(port).await?;
    let url = server.authorize_url(client_id)?;

    tracing::info!("正在打开浏览器进行授权，请在页面中点击 Authorize");
    if let Err(e) = open_browser(url.as_str()) {
        tracing::warn!(%url, "无法打开浏览器，请手动访问授权地址: {e}");
    }

    let token = server.wait_for_token(timeout).await?;
    tracing::info!("授权成功");
    Ok(token)
}

/// 用系统默认程序打开地址，不等待浏览器退出。
pub fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(url);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
