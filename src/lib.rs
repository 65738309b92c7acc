pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod ui;

pub use error::{ErrorKind, Result, VersionError};
