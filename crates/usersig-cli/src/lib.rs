//! UserSig CLI - command-line front end for usersig-core
//!
//! Issues tokens from a PEM private key, verifies them against a PEM public
//! key, and decodes them for inspection.

pub mod commands;
pub mod config;

pub use commands::{run, Cli, Commands};
pub use config::CliConfig;
