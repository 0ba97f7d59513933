//! Netlify 接入：隐式授权拿令牌、拉取站点文件清单、按路径流式读取文件。

pub mod constants;
pub mod functions;
pub mod structs;
