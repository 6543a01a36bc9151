use std::ffi::OsString;
use std::path::PathBuf;

use mmcai_auth::yggdrasil::DEFAULT_USER_AGENT;

macro_rules! builder_method {
	($name:ident, $ty:ty, $doc:literal) => {
		#[doc = $doc]
		pub fn $name(mut self, $name: $ty) -> Self {
			self.config.$name = $name;
			self
		}
	};
}

/// Environment variable the launcher sets to the instance's Java executable
pub const JAVA_ENV_VAR: &str = "INST_JAVA";

/// Configuration for the wrapper
#[derive(Debug, Clone)]
pub struct Configuration {
	/// Whether to censor user credentials in output messages and logs
	pub(crate) censor_secrets: bool,
	/// User-Agent header to send when signing in
	pub(crate) user_agent: String,
	/// Directory to search for the injector in. Defaults to the directory of the executable
	pub(crate) injector_dir: Option<PathBuf>,
	/// Java executable to use instead of the one from the environment or command
	pub(crate) java: Option<OsString>,
}

impl Default for Configuration {
	fn default() -> Self {
		Self::new()
	}
}

impl Configuration {
	/// Construct the default configuration
	pub fn new() -> Self {
		Self {
			censor_secrets: true,
			user_agent: DEFAULT_USER_AGENT.into(),
			injector_dir: None,
			java: None,
		}
	}

	/// Get a builder for the configuration
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::new()
	}
}

/// Simple builder for the configuration
pub struct ConfigBuilder {
	config: Configuration,
}

impl ConfigBuilder {
	/// Start a new ConfigBuilder with default configuration
	pub fn new() -> Self {
		Self {
			config: Configuration::new(),
		}
	}

	/// Finish building and get the configuration
	pub fn build(self) -> Configuration {
		self.config
	}

	builder_method!(
		censor_secrets,
		bool,
		"Set whether to censor user credentials in output messages and logs"
	);

	builder_method!(user_agent, String, "Set the User-Agent used for signing in");

	builder_method!(
		injector_dir,
		Option<PathBuf>,
		"Set the directory to search for authlib-injector in"
	);

	builder_method!(
		java,
		Option<OsString>,
		"Set a Java executable that takes priority over INST_JAVA"
	);
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}
