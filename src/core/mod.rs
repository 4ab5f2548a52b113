//! Core types, configuration and utilities

pub mod types;
pub mod error;
pub mod logging;
pub mod config;

pub use types::*;
pub use error::{Direction, Error};
pub use config::SculptConfig;
