//! 站点文件领域：清单记录、下载任务，以及从扁平路径还原目录结构。

pub mod functions;
pub mod structs;
