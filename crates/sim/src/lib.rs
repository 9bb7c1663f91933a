//! Deterministic in-process automation provider.
//!
//! Implements the `headful-provider` capability traits without touching a real
//! browser: launches and connects succeed or fail according to scripted
//! [`Faults`], navigation can be made to hang until its deadline, and every
//! provider call is counted in [`SimStats`] so lifecycle tests can assert
//! exactly what the session layer did.

mod browser;
mod stats;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use headful_provider::{
	AutomationProvider, BrowserHandle, ConnectOptions, Error, LaunchOptions, PersistentLaunch,
	Result, ServerHandle, ServerOptions,
};
use tracing::debug;

use self::browser::{SimBrowser, SimServer};
pub use self::stats::SimStats;

/// Scripted failure behavior for a [`SimProvider`].
#[derive(Debug, Clone, Default)]
pub struct Faults {
	/// Fail every launch-style operation with this message.
	pub launch_failure: Option<String>,
	/// Refuse every connect-style operation.
	pub refuse_connect: bool,
	/// Make `goto` hang until its deadline and fail with a timeout.
	pub hang_navigation: bool,
	/// Make `wait_for_selector` hang until its deadline and fail with a timeout.
	pub hang_selector: bool,
	/// Fail every page close (the close is still counted and takes effect).
	pub fail_page_close: bool,
	/// Fail every context close (the close is still counted and takes effect).
	pub fail_context_close: bool,
}

/// In-process provider with scripted faults and call accounting.
pub struct SimProvider {
	faults: Faults,
	stats: Arc<SimStats>,
	seeded_contexts: usize,
	seeded_pages_per_context: usize,
}

impl SimProvider {
	/// Creates a well-behaved provider: every operation succeeds, connected
	/// browsers start with zero contexts.
	pub fn new() -> Self {
		Self {
			faults: Faults::default(),
			stats: Arc::new(SimStats::default()),
			seeded_contexts: 0,
			seeded_pages_per_context: 0,
		}
	}

	/// Sets scripted failure behavior.
	pub fn faults(mut self, faults: Faults) -> Self {
		self.faults = faults;
		self
	}

	/// Pre-seeds connected browsers with existing contexts and pages, as if
	/// another client had been using the browser already. Seeded handles do
	/// not count as created in [`SimStats`].
	pub fn seed(mut self, contexts: usize, pages_per_context: usize) -> Self {
		self.seeded_contexts = contexts;
		self.seeded_pages_per_context = pages_per_context;
		self
	}

	/// Shared call counters for assertions.
	pub fn stats(&self) -> Arc<SimStats> {
		Arc::clone(&self.stats)
	}

	fn spawn_browser(&self) -> Arc<SimBrowser> {
		SimBrowser::new(Arc::clone(&self.stats), self.faults.clone())
	}

	fn fail_if_launch_scripted(&self) -> Result<()> {
		match &self.faults.launch_failure {
			Some(message) => Err(Error::LaunchFailure(message.clone())),
			None => Ok(()),
		}
	}

	fn fail_if_connect_refused(&self, endpoint: &str) -> Result<()> {
		if self.faults.refuse_connect {
			return Err(Error::ConnectionRefused {
				endpoint: endpoint.to_string(),
			});
		}
		Ok(())
	}

	fn attached_browser(&self) -> Arc<SimBrowser> {
		let browser = self.spawn_browser();
		for _ in 0..self.seeded_contexts {
			let context = browser.seed_context();
			for _ in 0..self.seeded_pages_per_context {
				context.seed_page();
			}
		}
		browser
	}
}

impl Default for SimProvider {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl AutomationProvider for SimProvider {
	async fn launch(&self, options: LaunchOptions) -> Result<Arc<dyn BrowserHandle>> {
		self.fail_if_launch_scripted()?;
		self.stats.inc_launches();
		debug!(target: "headful.sim", headless = options.is_headless(), "simulated launch");
		Ok(self.spawn_browser())
	}

	async fn launch_server(&self, options: ServerOptions) -> Result<Arc<dyn ServerHandle>> {
		self.fail_if_launch_scripted()?;
		self.stats.inc_server_launches();
		let endpoint = format!(
			"ws://{}:{}{}",
			options.host.as_deref().unwrap_or("127.0.0.1"),
			options.port.unwrap_or(3000),
			options.path.as_deref().unwrap_or("/"),
		);
		debug!(target: "headful.sim", %endpoint, "simulated server launch");
		Ok(SimServer::new(
			endpoint,
			self.spawn_browser(),
			Arc::clone(&self.stats),
		))
	}

	async fn launch_persistent(
		&self,
		profile_dir: &Path,
		options: LaunchOptions,
	) -> Result<PersistentLaunch> {
		self.fail_if_launch_scripted()?;
		self.stats.inc_persistent_launches();
		debug!(
			target: "headful.sim",
			profile_dir = %profile_dir.display(),
			headless = options.is_headless(),
			"simulated persistent launch"
		);
		let browser = self.spawn_browser();
		// A persistent profile always comes up with its default context open.
		let context = browser.seed_context();
		Ok(PersistentLaunch { browser, context })
	}

	async fn connect(
		&self,
		endpoint: &str,
		_options: ConnectOptions,
	) -> Result<Arc<dyn BrowserHandle>> {
		self.fail_if_connect_refused(endpoint)?;
		self.stats.inc_connects();
		debug!(target: "headful.sim", %endpoint, "simulated socket connect");
		Ok(self.attached_browser())
	}

	async fn connect_over_debug(
		&self,
		endpoint: &str,
		_options: ConnectOptions,
	) -> Result<Arc<dyn BrowserHandle>> {
		self.fail_if_connect_refused(endpoint)?;
		self.stats.inc_debug_connects();
		debug!(target: "headful.sim", %endpoint, "simulated debug-protocol connect");
		Ok(self.attached_browser())
	}
}

#[cfg(test)]
mod tests {
	use headful_provider::{ContextHandle, GotoOptions, PageHandle, PdfOptions};

	use super::*;

	#[tokio::test]
	async fn scripted_launch_failure_surfaces_message() {
		let provider = SimProvider::new().faults(Faults {
			launch_failure: Some("executable not found".into()),
			..Faults::default()
		});
		let err = provider.launch(LaunchOptions::new()).await.unwrap_err();
		assert!(matches!(err, Error::LaunchFailure(_)));
		assert_eq!(provider.stats().launches(), 0);
	}

	#[tokio::test]
	async fn seeded_connect_exposes_existing_contexts_and_pages() {
		let provider = SimProvider::new().seed(1, 2);
		let browser = provider
			.connect("ws://127.0.0.1:3000/", ConnectOptions::new())
			.await
			.unwrap();
		let contexts = browser.contexts();
		assert_eq!(contexts.len(), 1);
		assert_eq!(contexts[0].pages().len(), 2);
		// Seeds are pre-existing state, not provider calls.
		assert_eq!(provider.stats().contexts_created(), 0);
		assert_eq!(provider.stats().pages_created(), 0);
	}

	#[tokio::test]
	async fn hanging_navigation_times_out_at_the_bound() {
		let provider = SimProvider::new().faults(Faults {
			hang_navigation: true,
			..Faults::default()
		});
		let browser = provider.launch(LaunchOptions::new()).await.unwrap();
		let context = browser.new_context().await.unwrap();
		let page = context.new_page().await.unwrap();
		let err = page
			.goto("https://example.com", GotoOptions::new().timeout_ms(20))
			.await
			.unwrap_err();
		assert!(err.is_timeout());
	}

	#[tokio::test]
	async fn pdf_writes_the_requested_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("page.pdf");

		let provider = SimProvider::new();
		let browser = provider.launch(LaunchOptions::new()).await.unwrap();
		let context = browser.new_context().await.unwrap();
		let page = context.new_page().await.unwrap();
		page.goto("https://example.com", GotoOptions::new()).await.unwrap();
		page.pdf(PdfOptions::new(&path)).await.unwrap();

		assert!(path.exists());
		assert_eq!(page.url(), "https://example.com");
		assert_eq!(provider.stats().pdf_exports(), 1);
	}
}
