//! Command-line driver for ErrorScript.
//!
//! - `args` - `clap` definition of the `esc` command line
//! - `config` - `tsconfig.json` loading and file discovery
//! - `driver` - resolves inputs and checks files in parallel
//! - `reporter` - tsc-style, pretty and JSON output
//! - `watch` - re-check on file changes

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod watch;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "../tests/watch_tests.rs"]
mod watch_tests;
