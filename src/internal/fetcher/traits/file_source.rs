//! 文件来源 trait：下载器只依赖它拿到字节流，托管方的鉴权与地址拼接都在实现里。

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;

use crate::internal::fetcher::structs::fetch_error::FetchError;

/// 按顺序产出的文件字节块。
pub type ByteStream =
    Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send + 'static>>;

/// 单文件流式来源。
///
/// `open` 在拿到响应头后返回；之后的每一块数据由调用方逐块消费。
#[async_trait]
pub trait FileSource: Send + Sync {
    /// 打开 `source_path`（站点内相对路径，不带前导 `/`）对应的字节流。
    async fn open(&self, source_path: &str) -> Result<ByteStream, FetchError>;
}
