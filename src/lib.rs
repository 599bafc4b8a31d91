//! Slipway - toolchain-configuration resolution for native build graphs.
//!
//! Once per build invocation, this crate decides which compiler toolchain
//! the native build uses and with which flags, by layering a default config
//! block, a product-specific override block, and environment variables, and
//! then publishes the outcome (plus the global flag lists) as named build
//! variables for a downstream substitution system.

pub mod config;
pub mod flags;
pub mod registry;
pub mod util;
pub mod vars;

pub use config::{resolve, Env, ResolveError, ToolchainConfig};
pub use registry::VariableRegistry;
pub use vars::build_registry;
