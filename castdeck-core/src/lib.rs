pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
