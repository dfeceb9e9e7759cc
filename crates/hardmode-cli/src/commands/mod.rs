pub mod config;
pub mod day;
pub mod eta;
pub mod stats;
pub mod task;
pub mod timer;
