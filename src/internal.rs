pub mod archive;
pub mod entrance;
pub mod fetcher;
pub mod netlify;
pub mod orchestrator;
pub mod progress;
pub mod scheduler;
pub mod site_file;
