pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod evidence;
pub mod logging;
pub mod materialize;
pub mod output;
pub mod prompt;
pub mod scanner;
pub mod search;

pub use error::{Result, WsAuditError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
