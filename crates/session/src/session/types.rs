use std::sync::Arc;

use headful_provider::{ContextHandle, PageHandle};
use serde::{Deserialize, Serialize};

/// Whether the session's browser handle is exclusively owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOwnership {
	/// The session spawned the browser and terminates it on release.
	Owned,
	/// The session attached to a browser someone else owns; release only
	/// detaches.
	Attached,
}

/// Endpoints discovered while acquiring a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
	/// WebSocket endpoint (attach URL or launched-server endpoint).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ws: Option<String>,
	/// Remote-debug-protocol endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub debug: Option<String>,
}

impl Endpoints {
	/// Returns true when no endpoint was discovered.
	pub fn is_empty(&self) -> bool {
		self.ws.is_none() && self.debug.is_none()
	}
}

/// A context tracked by a session, with its cleanup obligation.
pub(crate) struct ContextSlot {
	pub(crate) handle: Arc<dyn ContextHandle>,
	/// True when the session created the context and must close it.
	pub(crate) owned: bool,
}

/// A page tracked by a session, with its cleanup obligation.
pub(crate) struct PageSlot {
	pub(crate) handle: Arc<dyn PageHandle>,
	/// True when the session created the page and must close it.
	pub(crate) owned: bool,
}
