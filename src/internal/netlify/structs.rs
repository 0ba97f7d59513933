pub mod auth_error;
pub mod callback_server;
pub mod manifest_fetch_error;
pub mod netlify_auth;
pub mod netlify_file_source;

pub use auth_error::AuthError;
pub use callback_server::CallbackServer;
pub use manifest_fetch_error::ManifestFetchError;
pub use netlify_auth::NetlifyAuth;
pub use netlify_file_source::NetlifyFileSource;
