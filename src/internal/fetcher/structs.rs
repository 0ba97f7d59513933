pub mod fetch_error;
pub mod file_fetcher;

pub use fetch_error::{FetchError, FetchErrorKind};
pub use file_fetcher::FileFetcher;
