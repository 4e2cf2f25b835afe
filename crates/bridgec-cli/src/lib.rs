//! Command-line driver for the bridgec binding compiler.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `args` | `clap` argument definitions |
//! | `config` | `bridgec.json` loading and option merging |
//! | `driver` | one invocation, from graph file to written output units |
//! | `reporter` | terminal rendering of fatal errors |
//! | `tracing_config` | `BRIDGEC_LOG` subscriber setup |

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
