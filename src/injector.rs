use std::fs;
use std::path::{Path, PathBuf};

use mmcai_shared::util::executable_dir;

/// The prefix of authlib-injector jar file names
const INJECTOR_PREFIX: &str = "authlib-injector";
/// The extension of authlib-injector jar file names
const INJECTOR_SUFFIX: &str = ".jar";

/// Checks if a file name looks like an authlib-injector jar
pub fn is_injector_file_name(file_name: &str) -> bool {
	file_name.starts_with(INJECTOR_PREFIX) && file_name.ends_with(INJECTOR_SUFFIX)
}

/// Find an authlib-injector jar in a directory. When no directory is given,
/// the directory of the running executable is searched
pub fn find_authlib_injector(dir: Option<&Path>) -> Option<PathBuf> {
	let dir = match dir {
		Some(dir) => dir.to_path_buf(),
		None => executable_dir()?,
	};

	fs::read_dir(dir)
		.ok()?
		.filter_map(Result::ok)
		.find(|entry| {
			entry
				.file_name()
				.to_str()
				.is_some_and(is_injector_file_name)
		})
		.map(|entry| entry.path())
}
