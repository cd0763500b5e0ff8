pub mod averager;
pub mod config;
pub mod ingest;
pub mod log;
pub mod progress;
pub mod reconcile;
pub mod segmenter;
pub mod sync;
pub mod writeback;
