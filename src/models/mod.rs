//! Domain models: timestamps, time windows and laytime request/result types.

pub mod laytime;
pub mod time;

pub use laytime::*;
pub use time::*;
