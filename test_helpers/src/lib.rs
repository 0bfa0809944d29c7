//! Test helpers shared across the workspace.
//!
//! [`jail`] wraps `figment::Jail` so tests can create documents and set
//! environment variables in isolation; [`documents`] holds the sample
//! documents the suites bind against.

pub mod documents;
pub mod jail;

pub use jail::{figment_error, with_jail, write_document};
