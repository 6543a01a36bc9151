#![warn(missing_docs)]
#![deny(unsafe_code)]

//! This library is used by mmcai to log in to authentication servers that expose an
//! authlib-injector compatible Yggdrasil API. It provides the login routine and the
//! wire types it uses, but launching the game with the results is left to the caller.
//! For an example of using this crate, look at the `launch` module in the `mmcai` crate.

/// Yggdrasil login against the authlib integration API
pub mod yggdrasil;

pub use yggdrasil::{login, AccessToken, Credentials, LoginResult, Profile, YggdrasilError};
