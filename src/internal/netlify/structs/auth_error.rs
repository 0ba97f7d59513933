use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("令牌为空")]
    EmptyToken,

    #[error("client id 为空")]
    EmptyClientId,

    #[error("令牌包含非法字符: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("API 地址非法: {0}")]
    InvalidApiBase(String),

    #[error("授权地址拼接失败: {0}")]
    AuthorizeUrl(#[source] url::ParseError),

    #[error("创建 HTTP 客户端失败: {0}")]
    Client(#[from] reqwest::Error),

    #[error("回调服务监听端口 {port} 失败: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("回调中没有 access_token")]
    MissingToken,

    #[error("回调服务已提前退出")]
    ServerClosed,

    #[error("等待授权超时（{0:?}）")]
    Timeout(Duration),
}
