#![doc = include_str!("../README.md")]
//! mercato-middleware
//!
//! Re-exports for the cache, the limiter, and the middleware wrappers.

mod builder;
mod cache;
mod cooldown;
mod limiter;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{DEFAULT_CAPACITY, Lookup, TtlCache};
pub use crate::cooldown::{CooldownConnector, CooldownMiddleware};
pub use crate::limiter::CooldownLimiter;
