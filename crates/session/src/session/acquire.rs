//! Per-strategy browser acquisition.

use std::sync::Arc;

use headful_provider::{
	AutomationProvider, BrowserHandle, ConnectOptions, LaunchOptions, ServerHandle, ServerOptions,
};
use tracing::debug;

use super::types::{ContextSlot, Endpoints, HandleOwnership};
use super::{Session, SessionState};
use crate::error::Result;
use crate::strategy::AcquisitionStrategy;

/// Resolves `strategy` into a live [`Session`].
///
/// No retries: a failed acquisition surfaces its provider error unchanged
/// and leaves nothing behind for the caller to release.
pub(crate) async fn acquire(
	provider: &dyn AutomationProvider,
	strategy: AcquisitionStrategy,
) -> Result<Session> {
	match strategy {
		AcquisitionStrategy::SpawnLocal {
			executable_path,
			headless,
			extra_args,
		} => {
			debug!(target: "headful.session", headless, "spawning local browser");
			let mut options = LaunchOptions::new().headless(headless);
			if let Some(path) = executable_path {
				options = options.executable_path(path);
			}
			for arg in extra_args {
				options = options.arg(arg);
			}
			let handle = provider.launch(options).await?;
			Ok(assemble(
				handle,
				HandleOwnership::Owned,
				Endpoints::default(),
				None,
				None,
			))
		}

		AcquisitionStrategy::ConnectSocket { url } => {
			debug!(target: "headful.session", endpoint = %url, "connecting over socket");
			let handle = provider.connect(&url, ConnectOptions::new()).await?;
			Ok(assemble(
				handle,
				HandleOwnership::Attached,
				Endpoints {
					ws: Some(url),
					debug: None,
				},
				None,
				None,
			))
		}

		AcquisitionStrategy::ConnectDebugProtocol { url } => {
			debug!(target: "headful.session", endpoint = %url, "connecting over debug protocol");
			let handle = provider.connect_over_debug(&url, ConnectOptions::new()).await?;
			Ok(assemble(
				handle,
				HandleOwnership::Attached,
				Endpoints {
					ws: None,
					debug: Some(url),
				},
				None,
				None,
			))
		}

		AcquisitionStrategy::LaunchPersistent {
			profile_dir,
			options,
		} => {
			debug!(
				target: "headful.session",
				profile_dir = %profile_dir.display(),
				"launching persistent profile"
			);
			let launch = provider.launch_persistent(&profile_dir, options).await?;
			// The profile's default context pre-exists the session; the owned
			// browser's termination covers it on release.
			Ok(assemble(
				launch.browser,
				HandleOwnership::Owned,
				Endpoints::default(),
				None,
				Some(ContextSlot {
					handle: launch.context,
					owned: false,
				}),
			))
		}

		AcquisitionStrategy::LaunchServer {
			host,
			port,
			path,
			options,
		} => {
			let mut server_options = ServerOptions::new().launch(options);
			if let Some(host) = host {
				server_options = server_options.host(host);
			}
			if let Some(port) = port {
				server_options = server_options.port(port);
			}
			if let Some(path) = path {
				server_options = server_options.path(path);
			}
			let server = provider.launch_server(server_options).await?;
			let endpoint = server.endpoint();
			debug!(target: "headful.session", %endpoint, "launched browser server");
			Ok(assemble(
				server.browser(),
				HandleOwnership::Owned,
				Endpoints {
					ws: Some(endpoint),
					debug: None,
				},
				Some(server),
				None,
			))
		}
	}
}

fn assemble(
	handle: Arc<dyn BrowserHandle>,
	ownership: HandleOwnership,
	endpoints: Endpoints,
	server: Option<Arc<dyn ServerHandle>>,
	context: Option<ContextSlot>,
) -> Session {
	Session {
		handle,
		server,
		ownership,
		endpoints,
		context,
		page: None,
		state: SessionState::Acquired,
	}
}
