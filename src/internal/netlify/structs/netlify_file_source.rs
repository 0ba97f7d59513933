//! 站点文件来源：`GET {api}/sites/{site_id}/files/{path}`，响应体按块流式返回。

use async_trait::async_trait;
use futures_util::TryStreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::internal::fetcher::structs::FetchError;
use crate::internal::fetcher::traits::{ByteStream, FileSource};
use crate::internal::netlify::constants::RAW_FILE_CONTENT_TYPE;

use super::netlify_auth::NetlifyAuth;

/// 单段路径中需要转义的字符，`/` 也在其中，分段编码后再用 `/` 拼回
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct NetlifyFileSource {
    auth: NetlifyAuth,
    site_id: String,
}

impl NetlifyFileSource {
    pub fn new(auth: NetlifyAuth, site_id: impl Into<String>) -> Self {
        Self {
            auth,
            site_id: site_id.into(),
        }
    }

    /// 清单路径对应的文件地址。
    pub fn file_url(&self, source_path: &str) -> Result<Url, url::ParseError> {
        let encoded = encode_path(source_path.trim_start_matches('/'));
        self.auth.endpoint(&format!(
            "sites/{}/files/{}",
            encode_path(&self.site_id),
            encoded
        ))
    }
}

pub(crate) fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|seg| utf8_percent_encode(seg, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl FileSource for NetlifyFileSource {
    async fn open(&self, source_path: &str) -> Result<ByteStream, FetchError> {
        let url =
            self.file_url(source_path)
                .map_err(|e| FetchError::InvalidUrl {
                    path: source_path.to_string(),
                    reason: e.to_string(),
                })?;

        let response = self
            .auth
            .client
            .get(url)
            .header(CONTENT_TYPE, RAW_FILE_CONTENT_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                path: source_path.to_string(),
            });
        }

        Ok(Box::pin(response.bytes_stream().map_err(FetchError::Request)))
    }
}
