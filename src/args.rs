use mmcai_auth::Credentials;

use crate::WrapperError;

/// The arguments a launcher passes to the wrapper: our own three positionals,
/// then the command line it would have run on its own
#[derive(Debug, Clone)]
pub struct WrapperArgs {
	/// Login and password for the authentication server
	pub credentials: Credentials,
	/// The authlib API URL of the authentication server
	pub api_url: String,
	/// The wrapped command. The first element is the Java executable
	pub command: Vec<String>,
}

impl WrapperArgs {
	/// Validate positional arguments. The program name is only used for the usage message
	pub fn from_positionals(program: &str, mut args: Vec<String>) -> Result<Self, WrapperError> {
		match args.len() {
			len if len < 3 => return Err(WrapperError::InvalidArgument(program.to_string())),
			3 => return Err(WrapperError::CannotRunDirectly),
			_ => {}
		}

		let command = args.split_off(3);
		let mut args = args.into_iter();
		let (Some(username), Some(password), Some(api_url)) =
			(args.next(), args.next(), args.next())
		else {
			return Err(WrapperError::InvalidArgument(program.to_string()));
		};

		Ok(Self {
			credentials: Credentials::new(username, password),
			api_url,
			command,
		})
	}

	/// The executable of the wrapped command
	pub fn wrapped_program(&self) -> Option<&str> {
		self.command.first().map(|x| x.as_str())
	}

	/// The arguments of the wrapped command, after the executable
	pub fn wrapped_args(&self) -> &[String] {
		self.command.get(1..).unwrap_or_default()
	}
}
