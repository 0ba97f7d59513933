use std::time::Duration;

/// Netlify API 默认地址
pub const DEFAULT_API_BASE: &str = "https://api.netlify.com/api/v1/";

/// 授权页地址
pub const AUTHORIZE_ENDPOINT: &str = "https://app.netlify.com/authorize";

/// 本地回调服务默认端口
pub const DEFAULT_CALLBACK_PORT: u16 = 3000;

/// 等待浏览器回调的默认时长
pub const DEFAULT_AUTHORIZE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// 读取站点文件原始内容时使用的 Content-Type
pub const RAW_FILE_CONTENT_TYPE: &str = "application/vnd.bitballoon.v1.raw";
