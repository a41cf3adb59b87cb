pub mod attribution;
pub mod config;
pub mod donation;
pub mod models;
pub mod storage;
