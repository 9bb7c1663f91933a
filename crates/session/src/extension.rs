//! Chromium launch arguments for unpacked extensions.

use std::path::{Path, PathBuf};

use headful_provider::LaunchOptions;

/// An unpacked Chromium extension loaded at browser launch.
///
/// Chromium only honors extension flags on a real (non-ephemeral) profile,
/// so these arguments are meant for persistent-profile launches.
#[derive(Debug, Clone)]
pub struct UnpackedExtension {
	dir: PathBuf,
}

impl UnpackedExtension {
	/// References the extension unpacked at `dir`.
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Extension directory on disk.
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Chromium arguments that load this extension and disable all others.
	pub fn chromium_args(&self) -> Vec<String> {
		let dir = self.dir.display();
		vec![
			format!("--disable-extensions-except={dir}"),
			format!("--load-extension={dir}"),
		]
	}

	/// Appends this extension's arguments to `options`.
	pub fn apply(&self, mut options: LaunchOptions) -> LaunchOptions {
		for arg in self.chromium_args() {
			options = options.arg(arg);
		}
		options
	}
}

/// URL of a page served by an installed extension.
pub fn extension_page_url(extension_id: &str, page: &str) -> String {
	format!("chrome-extension://{extension_id}/{page}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn args_pin_chromium_to_exactly_this_extension() {
		let ext = UnpackedExtension::new("/app/chromium-extensions/abc/3.7.0_0");
		assert_eq!(
			ext.chromium_args(),
			vec![
				"--disable-extensions-except=/app/chromium-extensions/abc/3.7.0_0".to_string(),
				"--load-extension=/app/chromium-extensions/abc/3.7.0_0".to_string(),
			]
		);
	}

	#[test]
	fn apply_preserves_existing_launch_args() {
		let ext = UnpackedExtension::new("/ext");
		let options = ext.apply(LaunchOptions::new().arg("--disable-gpu"));
		assert_eq!(
			options.args,
			vec![
				"--disable-gpu".to_string(),
				"--disable-extensions-except=/ext".to_string(),
				"--load-extension=/ext".to_string(),
			]
		);
	}

	#[test]
	fn page_urls_use_the_extension_scheme() {
		assert_eq!(
			extension_page_url("ophjlpahpchlmihnnnihgmmeilfjmjjc", "index.html"),
			"chrome-extension://ophjlpahpchlmihnnnihgmmeilfjmjjc/index.html"
		);
	}
}
