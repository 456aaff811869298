//! Finite-difference Greeks for the discrete pricing mode.
//!
//! - [`BumpConfig`]: bump widths with builder and validation
//! - [`bump_greeks`]: bump-and-reprice on a shared step grid

pub mod bump;
pub mod config;

pub use bump::{bump_greeks, Stencil};
pub use config::{BumpConfig, BumpConfigBuilder, BumpConfigError, DEFAULT_BUMP};
