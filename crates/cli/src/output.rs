use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use color_print::{cformat, cstr};
use mmcai::shared::output::{Message, MessageContents, MessageLevel, MmcaiOutput};
use mmcai::shared::util::utc_timestamp;

/// A nice colored bullet point for terminal output
pub const HYPHEN_POINT: &str = cstr!("<k!> - </k!>");

/// Prefix for every line we print, so that our output stands out in the launcher's log
const PREFIX: &str = "[mmcai] ";

/// String used for each level of indentation
const INDENT_STR: &str = "    ";

/// Terminal MmcaiOutput
pub struct TerminalOutput {
	level: MessageLevel,
	in_process: bool,
	indent_level: u8,
	color: bool,
	log_files: Option<LogFiles>,
}

/// The log files that every message is written to
struct LogFiles {
	log_file: File,
	latest_log_file: File,
}

impl MmcaiOutput for TerminalOutput {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		let _ = self.log_message(&text, level);
		self.display_text_impl(text, level);
	}

	fn display_message(&mut self, message: Message) {
		let _ = self.log_message(
			&Self::format_message_log(message.contents.clone()),
			message.level,
		);
		let text = if self.color {
			Self::format_message(message.contents)
		} else {
			Self::format_message_log(message.contents)
		};
		self.display_text_impl(text, message.level);
	}

	fn start_process(&mut self) {
		self.in_process = true;
	}

	fn end_process(&mut self) {
		self.in_process = false;
	}

	fn start_section(&mut self) {
		self.indent_level += 1;
	}

	fn end_section(&mut self) {
		if self.indent_level != 0 {
			self.indent_level -= 1;
		}
	}
}

impl TerminalOutput {
	/// Create a new TerminalOutput. Logs are written to the given directory if it can be created
	pub fn new(log_dir: Option<&Path>) -> Self {
		let log_files = log_dir.and_then(|dir| LogFiles::open(dir).ok());
		Self {
			level: MessageLevel::Important,
			in_process: false,
			indent_level: 0,
			color: std::io::stdout().is_terminal(),
			log_files,
		}
	}

	/// Display text
	fn display_text_impl(&mut self, text: String, level: MessageLevel) {
		if !level.at_least(&self.level) {
			return;
		}

		let indent = INDENT_STR.repeat(self.indent_level.into());
		// Processes are step by step updates, so mark them apart from finished messages
		let marker = if self.in_process { "> " } else { "" };
		println!("{PREFIX}{indent}{marker}{text}");
	}

	/// Formatting for messages
	fn format_message(contents: MessageContents) -> String {
		match contents {
			MessageContents::Simple(text) => text,
			MessageContents::Warning(text) => cformat!("<y><s>Warning:</> {}", text),
			MessageContents::Error(text) => cformat!("<r><s,u>Error:</> {}", text),
			MessageContents::Success(text) => cformat!("<g>{}", add_period(text)),
			MessageContents::Property(key, value) => {
				cformat!("<s>{}:</> {}", key, Self::format_message(*value))
			}
			MessageContents::Header(text) => cformat!("<s>{}", text),
			MessageContents::StartProcess(text) => cformat!("{text}..."),
			MessageContents::Hyperlink(url) => cformat!("<m,u>{}", url),
			MessageContents::ListItem(item) => {
				HYPHEN_POINT.to_string() + &Self::format_message(*item)
			}
			contents => contents.default_format(),
		}
	}

	/// Formatting for messages in the log file
	fn format_message_log(contents: MessageContents) -> String {
		match contents {
			MessageContents::Simple(text) => text,
			MessageContents::Warning(text) => format!("[WARN] {}", text),
			MessageContents::Error(text) => format!("[ERR] {}", text),
			MessageContents::Success(text) => format!("[SUCCESS] {}", add_period(text)),
			MessageContents::Property(key, value) => {
				format!("{}: {}", key, Self::format_message_log(*value))
			}
			MessageContents::Header(text) => format!("### {} ###", text),
			MessageContents::StartProcess(text) => format!("{text}..."),
			MessageContents::Hyperlink(url) => url,
			MessageContents::ListItem(item) => " - ".to_string() + &Self::format_message_log(*item),
			contents => contents.default_format(),
		}
	}

	/// Log a message to the log file
	pub fn log_message(&mut self, text: &str, level: MessageLevel) -> anyhow::Result<()> {
		let Some(files) = &mut self.log_files else {
			return Ok(());
		};
		let level_indicator = match level {
			MessageLevel::Important => "I",
			MessageLevel::Extra => "E",
			MessageLevel::Debug => "D",
			MessageLevel::Trace => "T",
		};
		writeln!(files.log_file, "[{level_indicator}] {text}")?;
		writeln!(files.latest_log_file, "[{level_indicator}] {text}")?;

		Ok(())
	}

	/// Set the log level of the output
	pub fn set_log_level(&mut self, level: MessageLevel) {
		self.level = level;
	}
}

impl LogFiles {
	/// Create the log directory and open both log files
	fn open(dir: &Path) -> anyhow::Result<Self> {
		std::fs::create_dir_all(dir).context("Failed to create log directory")?;
		let path = get_log_file_path(dir).context("Failed to get log file path")?;
		let log_file = File::create(path).context("Failed to open log file")?;
		let latest_log_file = File::create(get_latest_log_file_path(dir))
			.context("Failed to open latest.txt log file")?;
		Ok(Self {
			log_file,
			latest_log_file,
		})
	}
}

/// Get the path to a log file
fn get_log_file_path(dir: &Path) -> anyhow::Result<PathBuf> {
	Ok(dir.join(format!("log-{}.txt", utc_timestamp()?)))
}

/// Get the path to the latest log file
fn get_latest_log_file_path(dir: &Path) -> PathBuf {
	dir.join("latest.txt")
}

/// Adds a period to the end of a string if it isn't punctuated already
fn add_period(string: String) -> String {
	if string.ends_with(['.', ',', ';', ':', '!', '?']) {
		string
	} else {
		string + "."
	}
}
