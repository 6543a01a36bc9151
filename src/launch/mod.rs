/// Launching the Java process
pub mod process;
/// The launch script that the launcher sends to the game
pub mod script;

use std::io::{BufReader, Read};
use std::process::ExitStatus;

use mmcai_auth::yggdrasil;
use mmcai_shared::output::{MessageContents, MessageLevel, MmcaiOutput};

use crate::config::JAVA_ENV_VAR;
use crate::injector::find_authlib_injector;
use crate::{Configuration, WrapperArgs, WrapperError};

use self::process::{generate_jvm_args, launch_game_process, resolve_java, LaunchProcessParameters};
use self::script::LaunchScript;

/// Log in, rewrite the launch script read from stdin, and launch the game.
/// Returns the exit status of the game
pub async fn run(
	args: &WrapperArgs,
	config: &Configuration,
	o: &mut impl MmcaiOutput,
) -> Result<ExitStatus, WrapperError> {
	run_with_input(args, config, std::io::stdin(), o).await
}

/// Same as `run`, but reads the launch script from the given reader
pub async fn run_with_input(
	args: &WrapperArgs,
	config: &Configuration,
	input: impl Read,
	o: &mut impl MmcaiOutput,
) -> Result<ExitStatus, WrapperError> {
	let injector_path = find_authlib_injector(config.injector_dir.as_deref())
		.ok_or(WrapperError::AuthlibInjectorNotFound)?;
	o.display(
		MessageContents::Simple(format!(
			"authlib-injector found at {}, logging in...",
			injector_path.display()
		)),
		MessageLevel::Important,
	);

	let client = yggdrasil::create_client()?;
	let login = yggdrasil::login(
		&client,
		&args.credentials,
		&args.api_url,
		&config.user_agent,
		o,
	)
	.await?;
	let profile = &login.selected_profile;
	o.display_special_login(&profile.name, &args.api_url);

	let mut script = LaunchScript::read(BufReader::new(input))?;
	script.rewrite(&login.access_token.0, &profile.id, &profile.name)?;

	let java = resolve_java(
		config.java.as_deref(),
		std::env::var_os(JAVA_ENV_VAR),
		args.wrapped_program(),
	)?;
	let jvm_args = generate_jvm_args(
		&injector_path,
		&args.api_url,
		&login.prefetched_data,
		args.wrapped_args(),
	)?;

	let secrets = [
		login.access_token.0.as_str(),
		args.credentials.password.as_str(),
	];
	launch_game_process(
		LaunchProcessParameters {
			java: &java,
			jvm_args: &jvm_args,
			script: &script,
			secrets: &secrets,
			censor_secrets: config.censor_secrets,
		},
		o,
	)
}
