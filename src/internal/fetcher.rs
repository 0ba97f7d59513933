//! 单文件下载领域：来源 trait、下载错误与流式写盘实现。

pub mod structs;
pub mod traits;
