//! 一次站点下载的编排：准备目录、驱动调度、汇总结果。

pub mod structs;
