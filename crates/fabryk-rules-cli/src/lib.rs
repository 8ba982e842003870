//! # fabryk-rules-cli
//!
//! Command-line driver for [`fabryk_rules`]: reads a request document from a
//! file or stdin, compiles it with a TOML configuration and writes the query
//! document as pretty-printed JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command, ConfigAction};
pub use error::{Error, Result};
