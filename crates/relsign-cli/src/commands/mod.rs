//! Command implementations for relsign-cli

pub mod bump;
pub mod resolve;

pub use bump::run_bump_version;
pub use resolve::{ResolveOptions, run_resolve};
