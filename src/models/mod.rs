pub mod entry;
pub mod period;
pub mod task;
