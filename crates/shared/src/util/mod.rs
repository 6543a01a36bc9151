use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// String used to replace secrets in displayed text
pub const CENSOR_STR: &str = "***";

/// Get the current UTC timestamp in seconds
pub fn utc_timestamp() -> anyhow::Result<u64> {
	Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Get the directory containing the running executable
pub fn executable_dir() -> Option<PathBuf> {
	let exe_path = std::env::current_exe().ok()?;
	exe_path.parent().map(|x| x.to_path_buf())
}

/// Replaces every occurrence of each secret in a string with a censor.
/// Empty secrets are skipped
pub fn censor(text: &str, secrets: &[&str]) -> String {
	let mut out = text.to_string();
	for secret in secrets {
		if secret.is_empty() {
			continue;
		}
		out = out.replace(secret, CENSOR_STR);
	}
	out
}
