use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use mmcai_shared::output::{MessageContents, MessageLevel, MmcaiOutput};
use mmcai_shared::util::censor;

use super::script::LaunchScript;
use crate::WrapperError;

/// Choose the Java executable. An explicit override wins, then the launcher's
/// environment variable, then the program of the wrapped command
pub fn resolve_java(
	java_override: Option<&OsStr>,
	env_java: Option<OsString>,
	wrapped_program: Option<&str>,
) -> Result<OsString, WrapperError> {
	if let Some(java) = java_override {
		return Ok(java.to_owned());
	}
	if let Some(java) = env_java.filter(|x| !x.is_empty()) {
		return Ok(java);
	}
	wrapped_program
		.map(OsString::from)
		.ok_or(WrapperError::JavaExecutableNotFound)
}

/// Create the JVM arguments: the injector agent and prefetched metadata first,
/// followed by the arguments the launcher wanted
pub fn generate_jvm_args(
	injector_path: &Path,
	api_url: &str,
	prefetched_data: &str,
	launcher_args: &[String],
) -> Result<Vec<String>, WrapperError> {
	let injector_path = injector_path
		.to_str()
		.ok_or_else(|| WrapperError::InvalidInjectorPath(injector_path.to_path_buf()))?;

	let mut out = Vec::with_capacity(launcher_args.len() + 2);
	out.push(format!("-javaagent:{injector_path}={api_url}"));
	out.push(format!(
		"-Dauthlibinjector.yggdrasil.prefetched={prefetched_data}"
	));
	out.extend(launcher_args.iter().cloned());

	Ok(out)
}

/// Launch the game process, feed it the launch script, and wait for it to exit
pub(crate) fn launch_game_process(
	params: LaunchProcessParameters<'_>,
	o: &mut impl MmcaiOutput,
) -> Result<ExitStatus, WrapperError> {
	let mut cmd = Command::new(params.java);
	cmd.args(params.jvm_args);
	cmd.stdin(Stdio::piped());
	cmd.stdout(Stdio::inherit());
	cmd.stderr(Stdio::inherit());

	let secrets: &[&str] = if params.censor_secrets {
		params.secrets
	} else {
		&[]
	};
	output_launch_command(&cmd, params.script, secrets, o);

	let mut child = cmd.spawn().map_err(WrapperError::SpawnProcessFailed)?;

	let written = match child.stdin.as_mut() {
		Some(stdin) => params
			.script
			.write(stdin)
			.map_err(WrapperError::WriteLaunchScriptFailed),
		None => Err(WrapperError::StdinUnavailable),
	};
	// Close stdin so the game sees the end of the script
	drop(child.stdin.take());

	// The child is always reaped, even if it stopped reading early
	let status = child.wait().map_err(WrapperError::WaitProcessFailed)?;
	match written {
		Ok(()) => Ok(status),
		// An unsuccessful exit status takes priority over the broken pipe
		Err(e) if status.success() => Err(e),
		Err(e) => {
			o.display(
				MessageContents::Warning(format!("{e}")),
				MessageLevel::Debug,
			);
			Ok(status)
		}
	}
}

/// Display the launch command in our own way,
/// censoring any credentials
fn output_launch_command(
	command: &Command,
	script: &LaunchScript,
	secrets: &[&str],
	o: &mut impl MmcaiOutput,
) {
	o.end_process();
	o.display(
		MessageContents::Property(
			"Launch command".into(),
			Box::new(MessageContents::Simple(
				command.get_program().to_string_lossy().into(),
			)),
		),
		MessageLevel::Debug,
	);

	o.display(
		MessageContents::Header("Launch command arguments".into()),
		MessageLevel::Debug,
	);
	o.start_section();
	for arg in command.get_args() {
		let arg = censor(&arg.to_string_lossy(), secrets);
		o.display(
			MessageContents::ListItem(Box::new(MessageContents::Simple(arg))),
			MessageLevel::Debug,
		);
	}
	o.end_section();

	o.display(
		MessageContents::Header("Launch parameters".into()),
		MessageLevel::Trace,
	);
	o.start_section();
	for line in script.lines() {
		o.display(
			MessageContents::ListItem(Box::new(MessageContents::Simple(censor(line, secrets)))),
			MessageLevel::Trace,
		);
	}
	o.end_section();
}

/// Container struct for parameters for launching the game process
pub(crate) struct LaunchProcessParameters<'a> {
	/// The Java executable
	pub java: &'a OsStr,
	/// All arguments for the JVM
	pub jvm_args: &'a [String],
	/// The rewritten launch script to send to the game
	pub script: &'a LaunchScript,
	/// Strings that should not appear in output
	pub secrets: &'a [&'a str],
	/// Whether to hide the secrets in displayed output
	pub censor_secrets: bool,
}
