pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod notes;
pub mod publish;
pub mod release;
pub mod telemetry;
pub mod ui;

pub use error::{Result, ShipitError};
