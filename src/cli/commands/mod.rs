pub mod config;
pub mod db;
pub mod entries;
pub mod init;
pub mod log;
pub mod report;
pub mod sync;
pub mod tasks;
