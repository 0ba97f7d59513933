use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestFetchError {
    #[error("清单地址非法: {0}")]
    Url(#[from] url::ParseError),

    #[error("请求文件清单失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("文件清单请求返回异常状态 {status}: {body}")]
    Status { status: u16, body: String },

    #[error("文件清单解析失败: {0}")]
    Decode(#[source] reqwest::Error),
}
