//! Pure acquisition-strategy selection.

use std::path::{Path, PathBuf};

use headful_provider::LaunchOptions;
use serde::{Deserialize, Serialize};

/// How a browser handle is obtained.
///
/// Spawn-style strategies own the resulting browser and terminate it on
/// release; connect-style strategies attach to a browser someone else owns
/// and only detach on release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum AcquisitionStrategy {
	/// Spawn a local browser process.
	SpawnLocal {
		executable_path: Option<PathBuf>,
		headless: bool,
		#[serde(default)]
		extra_args: Vec<String>,
	},
	/// Connect to a running browser over its WebSocket endpoint.
	ConnectSocket { url: String },
	/// Connect to a running browser over its remote-debug-protocol endpoint.
	ConnectDebugProtocol { url: String },
	/// Launch a browser bound to a persistent profile directory.
	LaunchPersistent {
		profile_dir: PathBuf,
		options: LaunchOptions,
	},
	/// Launch a browser server exposing an endpoint for later connects.
	LaunchServer {
		host: Option<String>,
		port: Option<u16>,
		path: Option<String>,
		options: LaunchOptions,
	},
}

impl AcquisitionStrategy {
	/// Returns true when the resulting handle is exclusively owned and must
	/// be terminated on release.
	pub fn owns_browser(&self) -> bool {
		!matches!(
			self,
			AcquisitionStrategy::ConnectSocket { .. }
				| AcquisitionStrategy::ConnectDebugProtocol { .. }
		)
	}
}

/// Normalized caller inputs used to select an [`AcquisitionStrategy`].
#[derive(Debug, Clone, Copy)]
pub struct StrategyInput<'a> {
	/// WebSocket endpoint of a browser to attach to.
	pub socket_url: Option<&'a str>,
	/// Remote-debug-protocol endpoint of a browser to attach to.
	pub debug_url: Option<&'a str>,
	/// Persistent profile directory.
	pub profile_dir: Option<&'a Path>,
	/// Whether browser-server mode was requested.
	pub launch_server: bool,
	/// Server host interface.
	pub server_host: Option<&'a str>,
	/// Server port.
	pub server_port: Option<u16>,
	/// Server WebSocket path.
	pub server_path: Option<&'a str>,
	/// Browser executable path for spawn-style strategies.
	pub executable_path: Option<&'a Path>,
	/// Whether spawn-style strategies run headless.
	pub headless: bool,
	/// Extra browser arguments for spawn-style strategies.
	pub extra_args: &'a [String],
}

impl Default for StrategyInput<'_> {
	fn default() -> Self {
		Self {
			socket_url: None,
			debug_url: None,
			profile_dir: None,
			launch_server: false,
			server_host: None,
			server_port: None,
			server_path: None,
			executable_path: None,
			headless: true,
			extra_args: &[],
		}
	}
}

/// Resolves one strategy from normalized inputs.
///
/// Precedence: persistent profile, then server mode, then socket attach,
/// then debug-protocol attach, then local spawn.
pub fn resolve_strategy(input: StrategyInput<'_>) -> AcquisitionStrategy {
	if let Some(profile_dir) = input.profile_dir {
		return AcquisitionStrategy::LaunchPersistent {
			profile_dir: profile_dir.to_path_buf(),
			options: launch_options_from(&input),
		};
	}

	if input.launch_server {
		return AcquisitionStrategy::LaunchServer {
			host: input.server_host.map(str::to_string),
			port: input.server_port,
			path: input.server_path.map(str::to_string),
			options: launch_options_from(&input),
		};
	}

	if let Some(url) = input.socket_url {
		return AcquisitionStrategy::ConnectSocket {
			url: url.to_string(),
		};
	}

	if let Some(url) = input.debug_url {
		return AcquisitionStrategy::ConnectDebugProtocol {
			url: url.to_string(),
		};
	}

	AcquisitionStrategy::SpawnLocal {
		executable_path: input.executable_path.map(Path::to_path_buf),
		headless: input.headless,
		extra_args: input.extra_args.to_vec(),
	}
}

fn launch_options_from(input: &StrategyInput<'_>) -> LaunchOptions {
	let mut options = LaunchOptions::new().headless(input.headless);
	if let Some(path) = input.executable_path {
		options = options.executable_path(path);
	}
	for arg in input.extra_args {
		options = options.arg(arg);
	}
	options
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_input_spawns_a_headless_local_browser() {
		let strategy = resolve_strategy(StrategyInput::default());
		assert_eq!(
			strategy,
			AcquisitionStrategy::SpawnLocal {
				executable_path: None,
				headless: true,
				extra_args: Vec::new(),
			}
		);
		assert!(strategy.owns_browser());
	}

	#[test]
	fn persistent_profile_wins_over_everything_else() {
		let input = StrategyInput {
			profile_dir: Some(Path::new("/tmp/profile")),
			launch_server: true,
			socket_url: Some("ws://127.0.0.1:3000/"),
			debug_url: Some("http://127.0.0.1:9222"),
			..StrategyInput::default()
		};
		let strategy = resolve_strategy(input);
		assert!(matches!(
			strategy,
			AcquisitionStrategy::LaunchPersistent { .. }
		));
	}

	#[test]
	fn server_mode_wins_over_attach_endpoints() {
		let input = StrategyInput {
			launch_server: true,
			server_port: Some(3000),
			socket_url: Some("ws://127.0.0.1:3000/"),
			..StrategyInput::default()
		};
		match resolve_strategy(input) {
			AcquisitionStrategy::LaunchServer { port, .. } => assert_eq!(port, Some(3000)),
			other => panic!("expected server strategy, got {other:?}"),
		}
	}

	#[test]
	fn socket_attach_wins_over_debug_protocol_attach() {
		let input = StrategyInput {
			socket_url: Some("ws://127.0.0.1:3000/"),
			debug_url: Some("http://127.0.0.1:9222"),
			..StrategyInput::default()
		};
		let strategy = resolve_strategy(input);
		assert_eq!(
			strategy,
			AcquisitionStrategy::ConnectSocket {
				url: "ws://127.0.0.1:3000/".to_string(),
			}
		);
		assert!(!strategy.owns_browser());
	}

	#[test]
	fn debug_protocol_attach_used_when_only_debug_endpoint_given() {
		let input = StrategyInput {
			debug_url: Some("http://127.0.0.1:9222"),
			..StrategyInput::default()
		};
		let strategy = resolve_strategy(input);
		assert!(matches!(
			strategy,
			AcquisitionStrategy::ConnectDebugProtocol { .. }
		));
		assert!(!strategy.owns_browser());
	}

	#[test]
	fn spawn_inputs_carry_through_executable_and_args() {
		let args = vec!["--no-sandbox".to_string()];
		let input = StrategyInput {
			executable_path: Some(Path::new("/usr/bin/chromium")),
			headless: false,
			extra_args: &args,
			..StrategyInput::default()
		};
		assert_eq!(
			resolve_strategy(input),
			AcquisitionStrategy::SpawnLocal {
				executable_path: Some(PathBuf::from("/usr/bin/chromium")),
				headless: false,
				extra_args: args.clone(),
			}
		);
	}

	#[test]
	fn strategies_serialize_with_a_mode_tag() {
		let strategy = AcquisitionStrategy::ConnectSocket {
			url: "ws://127.0.0.1:3000/".to_string(),
		};
		let json = serde_json::to_string(&strategy).unwrap();
		assert!(json.contains("\"mode\":\"connectSocket\""));

		let back: AcquisitionStrategy = serde_json::from_str(&json).unwrap();
		assert_eq!(back, strategy);
	}
}
