pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod git;
pub mod interrupt;
pub mod logging;
pub mod output;
pub mod report;
pub mod scanner;

pub use error::{NorminoError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
