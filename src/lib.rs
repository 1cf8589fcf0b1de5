//! Weighted round robin item selection with a registry of named selectors.

pub mod config;
pub mod sched;
pub mod sync;

use std::io;

pub use config::{Config, Item, Items, Pool};
pub use sched::{ParseError, WeightedSelector};
pub use sync::{SelectorRegistry, SharedSelector};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top level error to use for return types in the public API and main function.
#[derive(Debug)]
pub enum Error {
    /// Failure reading a configuration file.
    Io(io::Error),

    /// An error while deserializing the config file.
    Toml(toml::de::Error),

    /// Malformed inline item list.
    Parse(ParseError),

    /// Malformed inline item list of a configured pool.
    Pool { name: String, source: ParseError },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Toml(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Pool { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {err}"),
            Error::Toml(err) => write!(f, "TOML parse error: {err}"),
            Error::Parse(err) => write!(f, "Item list error: {err}"),
            Error::Pool { name, source } => write!(f, "Pool '{name}': {source}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::Toml(value)
    }
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Error::Parse(value)
    }
}
