//! Command-line interface: argument parsing (`args`) and runtime setup
//! (`setup`). Command handlers live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{parse_args, Cli, Commands};
pub use setup::{configure_thread_pool, init_logging, level_for_verbosity};
