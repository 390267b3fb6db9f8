//! UI layer: the `kaiwa-render` command line interface.

pub mod cli;

pub use cli::{Args, CliError, run};
