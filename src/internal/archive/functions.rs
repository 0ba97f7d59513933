pub mod zip_site;

pub use zip_site::{archive_file_name, archive_site, zip_directory};
