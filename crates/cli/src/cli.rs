use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{bail, Context};
use clap::Parser;
use color_print::cformat;

use mmcai::shared::output::{MessageContents, MessageLevel, MmcaiOutput};
use mmcai::shared::util::executable_dir;
use mmcai::{Configuration, WrapperArgs};

use super::output::TerminalOutput;

/// Name of the log directory created next to the executable
const LOG_DIR_NAME: &str = "mmcai-logs";

#[derive(Debug, Parser)]
#[command(
	name = "mmcai",
	version,
	about = "Wrapper command that logs in with authlib-injector before launching the game",
	override_usage = "mmcai [OPTIONS] <USERNAME> <PASSWORD> <API_URL> <JAVA> [JVM_ARGS]..."
)]
pub struct Cli {
	#[arg(short, long)]
	debug: bool,
	#[arg(short = 'D', long)]
	trace: bool,
	/// Show credentials in the output and logs instead of hiding them
	#[arg(long)]
	no_censor: bool,
	/// Directory to look for authlib-injector in. Defaults to the directory of this executable
	#[arg(long)]
	injector_dir: Option<PathBuf>,
	/// Java executable to use instead of the one given by the launcher
	#[arg(long)]
	java: Option<PathBuf>,
	/// Directory to write logs to
	#[arg(long, env = "MMCAI_LOG_DIR")]
	log_dir: Option<PathBuf>,
	/// Username, password, and API URL, followed by the command from the launcher
	#[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
	args: Vec<String>,
}

/// Run the command line interface
pub async fn run_cli() -> anyhow::Result<ExitStatus> {
	// Parse the CLI
	let cli = Cli::try_parse();
	if let Err(e) = &cli {
		if let clap::error::ErrorKind::DisplayHelp
		| clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
		| clap::error::ErrorKind::DisplayVersion = e.kind()
		{
			println!("{e}");
			return Ok(ExitStatus::default());
		} else {
			eprintln!("{}", cformat!("<r>{e}"));
			bail!("");
		}
	}
	let cli = cli?;

	let mut output = TerminalOutput::new(get_log_dir(&cli).as_deref());
	output.set_log_level(get_log_level(&cli));

	let res = run(cli, &mut output).await;

	if let Err(e) = &res {
		output.display(
			MessageContents::Error(format!("{e:?}")),
			MessageLevel::Important,
		);
	}

	res
}

/// Validate arguments and run the wrapper
async fn run(cli: Cli, o: &mut TerminalOutput) -> anyhow::Result<ExitStatus> {
	let program = std::env::args().next().unwrap_or_else(|| "mmcai".into());
	let args = WrapperArgs::from_positionals(&program, cli.args)?;
	let config = Configuration::builder()
		.censor_secrets(!cli.no_censor)
		.injector_dir(cli.injector_dir)
		.java(cli.java.map(PathBuf::into_os_string))
		.build();

	let status = mmcai::run(&args, &config, o)
		.await
		.context("Failed to launch the game")?;

	if !status.success() {
		o.display(
			MessageContents::Warning(format!("The game exited with {status}")),
			MessageLevel::Important,
		);
	}

	Ok(status)
}

/// Get the log level based on the debug options
fn get_log_level(cli: &Cli) -> MessageLevel {
	if cli.trace {
		MessageLevel::Trace
	} else if cli.debug {
		MessageLevel::Debug
	} else {
		MessageLevel::Important
	}
}

/// Get the directory to write logs to, if there is one
fn get_log_dir(cli: &Cli) -> Option<PathBuf> {
	cli.log_dir
		.clone()
		.or_else(|| executable_dir().map(|x| x.join(LOG_DIR_NAME)))
}
