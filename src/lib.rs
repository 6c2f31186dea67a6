pub mod baseline;
pub mod config;
pub mod error;
pub mod fixture;
pub mod git;
pub mod log;
pub mod runner;
pub mod util;
