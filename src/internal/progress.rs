//! 进度领域：整体字节/文件计数的并发聚合与展示帧广播。

pub mod structs;
