use core::fmt;
use std::sync::Arc;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use sha2::{Digest, Sha256};
use url::Url;

use super::auth_error::AuthError;
use crate::internal::netlify::constants::DEFAULT_API_BASE;

/// 认证结构体
///
/// 该结构体定位
/// - 持有带 `Authorization: Bearer <token>` 默认头的 HTTP 客户端
/// - 持有 API 基础地址，清单与文件请求都基于它拼接
///
/// 默认Eq时会匹配api_base和token，如果需要单独比较token，需使用eq_only_token方法
#[derive(Clone)]
pub struct NetlifyAuth {
    pub client: Client,     // 内部是Arc，不需要特殊处理
    pub api_base: Arc<Url>, // 下载任务跨线程共享，用Arc
    pub(crate) token_fingerprint: Arc<String>, // 只保留指纹，不保留明文
}

impl NetlifyAuth {
    /// 使用默认 API 地址创建
    pub fn new(token: &str) -> Result<Self, AuthError> {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    pub fn with_api_base(
        token: &str,
        api_base: &str,
    ) -> Result<Self, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: Arc::new(format_api_base(api_base)?),
            token_fingerprint: Arc::new(fingerprint(token)),
        })
    }

    /// 仅比较token是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.token_fingerprint == other.token_fingerprint
    }

    /// 基于 api_base 拼接地址
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.api_base.join(path)
    }
}

impl PartialEq for NetlifyAuth {
    fn eq(&self, other: &Self) -> bool {
        self.token_fingerprint == other.token_fingerprint
            && self.api_base == other.api_base
    }
}

/// 防止debug泄漏令牌
impl fmt::Debug for NetlifyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetlifyAuth")
            .field("client", &"<Client with hidden authorization>")
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

fn fingerprint(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 补齐结尾的 `/`，否则 `join` 会丢掉最后一段路径
fn format_api_base(url: &str) -> Result<Url, AuthError> {
    if url.is_empty() {
        return Err(AuthError::InvalidApiBase("路径为空".to_string()));
    }

    let mut base_url =
        Url::parse(url).map_err(|e| AuthError::InvalidApiBase(e.to_string()))?;

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}
