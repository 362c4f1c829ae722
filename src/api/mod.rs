pub mod init;
pub mod relevance_api;
