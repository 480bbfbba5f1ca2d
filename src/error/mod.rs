//! Error types for the time-zone lookup engine.

mod artifact;
mod build;
mod configuration;
mod data;
mod domain;

pub use artifact::ArtifactError;
pub use build::BuildError;
pub use configuration::ConfigurationError;
pub use data::DataError;
pub use domain::{Axis, DomainError};
