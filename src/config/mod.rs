//! Configuration types and loading for flowres

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{FlowresConfig, LoggingConfig, OutputConfig, ResolverConfig};
