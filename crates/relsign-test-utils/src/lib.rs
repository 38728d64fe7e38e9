//! Shared test utilities for the relsign workspace.
//!
//! This crate provides standardised project fixtures to eliminate
//! duplication across crate test suites. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for a mobile project layout

pub mod project;

pub use project::TestProject;
