//! Mercato-specific error, capability, region, and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;
mod region;

pub use capability::Capability;
pub use config::{CacheConfig, CooldownConfig, MercatoConfig};
pub use connector::ConnectorKey;
pub use error::MercatoError;
pub use region::{MoverKind, Region};
