use std::io::{self, BufRead, Write};

use crate::WrapperError;

/// The line that ends the launch script
const LAUNCH_LINE: &str = "launch";

/// The line-based launch script that the launcher writes to the game's stdin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchScript {
	lines: Vec<String>,
}

impl LaunchScript {
	/// Create a launch script from lines that have already been read
	pub fn from_lines(lines: Vec<String>) -> Self {
		Self { lines }
	}

	/// Read the launch script. Lines are trimmed and reading stops after the `launch` line
	pub fn read(reader: impl BufRead) -> Result<Self, WrapperError> {
		let mut lines = Vec::new();
		for line in reader.lines() {
			let line = line.map_err(WrapperError::ReadLaunchScriptFailed)?;
			let line = line.trim().to_string();
			let is_end = line == LAUNCH_LINE;
			lines.push(line);
			if is_end {
				break;
			}
		}

		Ok(Self { lines })
	}

	/// The lines of the script
	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// Replace the player's name, UUID, and access token with ones from the authentication server
	pub fn rewrite(
		&mut self,
		access_token: &str,
		uuid: &str,
		player_name: &str,
	) -> Result<(), WrapperError> {
		for index in 0..self.lines.len() {
			let line = self.lines[index].as_str();
			if line.contains("param --username") {
				self.set_value_after(index, player_name)?;
			} else if line.contains("param --uuid") {
				self.set_value_after(index, uuid)?;
			} else if line.contains("param --accessToken") {
				self.set_value_after(index, access_token)?;
			} else if line.contains("userName ") {
				self.lines[index] = format!("userName {player_name}");
			} else if line.contains("sessionId ") {
				self.lines[index] = format!("sessionId token:{access_token}");
			}
		}

		Ok(())
	}

	/// Set the `param` line after a key
	fn set_value_after(&mut self, index: usize, value: &str) -> Result<(), WrapperError> {
		let key = self.lines[index].clone();
		let line = self
			.lines
			.get_mut(index + 1)
			.ok_or(WrapperError::MalformedLaunchScript(key))?;
		*line = format!("param {value}");
		Ok(())
	}

	/// Write the script, one line at a time
	pub fn write(&self, mut writer: impl Write) -> io::Result<()> {
		for line in &self.lines {
			writeln!(writer, "{line}")?;
		}
		writer.flush()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(lines: &[&str]) -> Vec<String> {
		lines.iter().map(|x| x.to_string()).collect()
	}

	#[test]
	fn test_read_stops_at_launch() {
		let input = "  mainClass org.multimc.EntryPoint\nparam --username\n\tparam Player \nlaunch\nafter launch\n";
		let script = LaunchScript::read(input.as_bytes()).unwrap();
		assert_eq!(
			script.lines(),
			[
				"mainClass org.multimc.EntryPoint",
				"param --username",
				"param Player",
				"launch"
			]
		);
	}

	#[test]
	fn test_read_without_launch_line() {
		let script = LaunchScript::read("a\nb".as_bytes()).unwrap();
		assert_eq!(script.lines(), ["a", "b"]);
	}

	#[test]
	fn test_rewrite() {
		let mut script = LaunchScript::from_lines(lines(&[
			"---START---",
			"param --username",
			"param AnyHow",
			"param --uuid",
			"param AnyHow",
			"param --accessToken",
			"param AnyHow",
			"userName AnyHow",
			"sessionId AnyHow",
			"launch",
			"---END---",
		]));
		script
			.rewrite("TEST_ACCESS_TOKEN", "TEST_UUID", "TEST_PLAYERNAME")
			.unwrap();
		assert_eq!(
			script.lines(),
			[
				"---START---",
				"param --username",
				"param TEST_PLAYERNAME",
				"param --uuid",
				"param TEST_UUID",
				"param --accessToken",
				"param TEST_ACCESS_TOKEN",
				"userName TEST_PLAYERNAME",
				"sessionId token:TEST_ACCESS_TOKEN",
				"launch",
				"---END---",
			]
		);
	}

	#[test]
	fn test_rewrite_dangling_key() {
		let mut script = LaunchScript::from_lines(lines(&["param --uuid"]));
		assert!(matches!(
			script.rewrite("token", "uuid", "name"),
			Err(WrapperError::MalformedLaunchScript(key)) if key == "param --uuid"
		));
	}

	#[test]
	fn test_write() {
		let script = LaunchScript::from_lines(lines(&["userName Steve", "launch"]));
		let mut out = Vec::new();
		script.write(&mut out).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "userName Steve\nlaunch\n");
	}
}
