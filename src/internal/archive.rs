//! 下载结果打包：把站点目录压成 zip，成功后删除原目录。

pub mod functions;
pub mod structs;
