pub mod colors;
pub mod date;
pub mod duration;
pub mod formatting;
pub mod jalali;
pub mod path;
pub mod table;

pub use duration::{format_duration, parse_duration};
