pub mod authorize;
pub mod list_site_files;

pub use authorize::{authorize, open_browser};
pub use list_site_files::list_site_files;
