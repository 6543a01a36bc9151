#![warn(missing_docs)]

//! mmcai is a wrapper command for MultiMC-based launchers that logs in to an
//! authlib-injector compatible authentication server and then launches the game
//! with the injector agent and the credentials it received.

pub use mmcai_auth as auth;
pub use mmcai_shared as shared;

/// Validation of the wrapper's command line
pub mod args;
/// Configuration for the wrapper
pub mod config;
/// Errors produced by the wrapper
pub mod error;
/// Locating the authlib-injector agent
pub mod injector;
/// Launching the game
pub mod launch;

pub use args::WrapperArgs;
pub use config::Configuration;
pub use error::WrapperError;
pub use launch::run;
