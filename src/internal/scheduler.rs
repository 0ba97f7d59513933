//! 调度领域：按并发上限放行下载任务，汇总每个任务的终态。

pub mod structs;
