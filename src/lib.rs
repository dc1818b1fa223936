//! GitHub Account Gateway
//!
//! An HTTP service that creates repositories, manages collaborators and
//! installs workflow files for the GitHub account owning the configured token.

pub mod client;
pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod workflow;
