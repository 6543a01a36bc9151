use std::io;
use std::path::PathBuf;

use mmcai_auth::YggdrasilError;
use thiserror::Error;

/// An error that stops the wrapper from launching the game
#[derive(Error, Debug)]
pub enum WrapperError {
	/// Not enough arguments were given
	#[error("Invalid arguments. Usage: {0} <username> <password> <api-url>")]
	InvalidArgument(String),

	/// The wrapper was run without a command to wrap
	#[error("This program is a wrapper command and cannot be run directly. Set it as the wrapper command of an instance in your launcher")]
	CannotRunDirectly,

	/// The injector jar was not found
	#[error("authlib-injector was not found. Place an authlib-injector*.jar file next to this executable")]
	AuthlibInjectorNotFound,

	/// The injector path can't be passed to Java
	#[error("The path to authlib-injector is not valid UTF-8: {0:?}")]
	InvalidInjectorPath(PathBuf),

	/// Logging in failed
	#[error(transparent)]
	Auth(#[from] YggdrasilError),

	/// The launch script could not be read from the launcher
	#[error("Failed to read launch parameters")]
	ReadLaunchScriptFailed(#[source] io::Error),

	/// A key in the launch script had no value after it
	#[error("Malformed launch parameters: '{0}' has no value")]
	MalformedLaunchScript(String),

	/// No Java executable was available
	#[error("No Java executable was found. The {} environment variable is not set", crate::config::JAVA_ENV_VAR)]
	JavaExecutableNotFound,

	/// Java failed to start
	#[error("Failed to spawn the game process")]
	SpawnProcessFailed(#[source] io::Error),

	/// The child process had no stdin to write the launch script to
	#[error("The game process has no stdin")]
	StdinUnavailable,

	/// The launch script could not be written to the child process
	#[error("Failed to write launch parameters to the game process")]
	WriteLaunchScriptFailed(#[source] io::Error),

	/// Waiting on the child process failed
	#[error("Failed to wait for the game process")]
	WaitProcessFailed(#[source] io::Error),
}
