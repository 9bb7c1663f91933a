//! Session lifecycle: acquisition, page tasks, guaranteed release.

mod acquire;
mod cleanup;
mod page_selection;
mod types;

use std::future::Future;
use std::sync::Arc;

use headful_provider::{AutomationProvider, BrowserHandle, ContextHandle, PageHandle, ServerHandle};
use tracing::{debug, warn};

pub use cleanup::{CleanupFailure, CleanupReport, CleanupStage};
pub use types::{Endpoints, HandleOwnership};

use self::types::{ContextSlot, PageSlot};
use crate::error::{Result, SessionError};
use crate::strategy::AcquisitionStrategy;

/// Lifecycle of a live session.
///
/// Acquisition states (unacquired, acquiring, failed) exist only inside
/// [`SessionManager::acquire`]; a `Session` value is already acquired.
/// `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
	Acquired,
	InUse,
	Released,
}

/// Resolves acquisition strategies against one automation provider.
pub struct SessionManager {
	provider: Arc<dyn AutomationProvider>,
}

impl SessionManager {
	/// Creates a manager backed by `provider`.
	pub fn new(provider: Arc<dyn AutomationProvider>) -> Self {
		Self { provider }
	}

	/// Obtains a browser handle according to `strategy`.
	///
	/// Spawn-style strategies produce a session that owns (and will
	/// terminate) the browser; connect-style strategies attach and only
	/// detach on release. Failures surface unchanged with nothing acquired.
	pub async fn acquire(&self, strategy: AcquisitionStrategy) -> Result<Session> {
		acquire::acquire(self.provider.as_ref(), strategy).await
	}

	/// Acquires a session, runs `task` against its page, and releases on
	/// every exit path.
	///
	/// This is the scoped form of the lifecycle: callers that need multiple
	/// tasks against one session use [`SessionManager::acquire`] and
	/// [`Session::with_page`] directly.
	pub async fn run<T, F, Fut>(&self, strategy: AcquisitionStrategy, task: F) -> Result<T>
	where
		F: FnOnce(Arc<dyn PageHandle>) -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let mut session = self.acquire(strategy).await?;
		let result = session.with_page(task).await;
		if result.is_ok() {
			let report = session.release().await;
			if !report.is_clean() {
				debug!(
					target: "headful.session",
					failures = report.failures().len(),
					"session released with cleanup failures"
				);
			}
		}
		result
	}
}

/// A resolved browser session.
///
/// Holds the provider handle plus the context and page the session works
/// with, tracking which of them the session itself created and must close.
/// `with_page` takes `&mut self`, so a session serves one logical task at a
/// time; independent sessions run fully in parallel.
///
/// Dropping an unreleased session performs a best-effort release on the
/// current async runtime, so early returns and cancelled tasks cannot leak
/// the browser.
pub struct Session {
	handle: Arc<dyn BrowserHandle>,
	server: Option<Arc<dyn ServerHandle>>,
	ownership: HandleOwnership,
	endpoints: Endpoints,
	context: Option<ContextSlot>,
	page: Option<PageSlot>,
	state: SessionState,
}

impl Session {
	/// Endpoints discovered during acquisition.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Whether release terminates or merely detaches the browser.
	pub fn ownership(&self) -> HandleOwnership {
		self.ownership
	}

	/// Returns true once the session has been released.
	pub fn is_released(&self) -> bool {
		self.state == SessionState::Released
	}

	/// Runs `task` against the session's page, creating the context and page
	/// on first use (reusing existing ones when the browser already has
	/// them, e.g. a persistent profile's default context).
	///
	/// Task errors propagate unchanged, but a failed task releases the
	/// session before the error is returned. On success the session stays
	/// acquired and further calls reuse the same page.
	pub async fn with_page<T, F, Fut>(&mut self, task: F) -> Result<T>
	where
		F: FnOnce(Arc<dyn PageHandle>) -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		if self.state == SessionState::Released {
			return Err(SessionError::Released);
		}

		let page = match self.ensure_page().await {
			Ok(page) => page,
			Err(err) => {
				self.release().await;
				return Err(err);
			}
		};

		self.state = SessionState::InUse;
		match task(page).await {
			Ok(value) => {
				self.state = SessionState::Acquired;
				Ok(value)
			}
			Err(err) => {
				debug!(target: "headful.session", error = %err, "task failed, releasing session");
				self.release().await;
				Err(err)
			}
		}
	}

	/// Releases everything the session owns: page, then context, then the
	/// browser (terminated when owned, detached when attached; a launched
	/// server is shut down).
	///
	/// Never fails. Individual close failures are recorded in the returned
	/// [`CleanupReport`] and logged; later steps still run. Releasing twice
	/// is a no-op the second time.
	pub async fn release(&mut self) -> CleanupReport {
		if self.state == SessionState::Released {
			debug!(target: "headful.session", "session already released");
			return CleanupReport::default();
		}
		self.state = SessionState::Released;

		cleanup::run_cleanup(
			self.page.take(),
			self.context.take(),
			self.server.take(),
			Arc::clone(&self.handle),
			self.ownership,
		)
		.await
	}

	async fn ensure_page(&mut self) -> Result<Arc<dyn PageHandle>> {
		if let Some(slot) = self.page.as_ref() {
			return Ok(Arc::clone(&slot.handle));
		}
		let context = self.ensure_context().await?;
		let slot = page_selection::select_page(context.as_ref()).await?;
		let page = Arc::clone(&slot.handle);
		self.page = Some(slot);
		Ok(page)
	}

	async fn ensure_context(&mut self) -> Result<Arc<dyn ContextHandle>> {
		if let Some(slot) = self.context.as_ref() {
			return Ok(Arc::clone(&slot.handle));
		}
		let slot = page_selection::select_context(self.handle.as_ref()).await?;
		let context = Arc::clone(&slot.handle);
		self.context = Some(slot);
		Ok(context)
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		if self.state == SessionState::Released {
			return;
		}
		self.state = SessionState::Released;

		let page = self.page.take();
		let context = self.context.take();
		let server = self.server.take();
		let handle = Arc::clone(&self.handle);
		let ownership = self.ownership;

		match tokio::runtime::Handle::try_current() {
			Ok(runtime) => {
				warn!(
					target: "headful.session",
					"session dropped without release, cleaning up in the background"
				);
				runtime.spawn(async move {
					cleanup::run_cleanup(page, context, server, handle, ownership).await;
				});
			}
			Err(_) => {
				warn!(
					target: "headful.session",
					"session dropped outside an async runtime, browser resources may leak"
				);
			}
		}
	}
}
