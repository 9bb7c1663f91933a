//! Simulated browser, server, context, and page handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use headful_provider::{
	BrowserHandle, ContextHandle, Error, GotoOptions, PageHandle, PdfOptions, Result,
	ServerHandle, WaitOptions,
};
use parking_lot::Mutex;

use crate::Faults;
use crate::stats::SimStats;

const PDF_STUB: &[u8] = b"%PDF-1.4\n%%EOF\n";

pub(crate) struct SimBrowser {
	stats: Arc<SimStats>,
	faults: Faults,
	contexts: Mutex<Vec<Arc<SimContext>>>,
	closed: AtomicBool,
}

impl SimBrowser {
	pub(crate) fn new(stats: Arc<SimStats>, faults: Faults) -> Arc<Self> {
		Arc::new(Self {
			stats,
			faults,
			contexts: Mutex::new(Vec::new()),
			closed: AtomicBool::new(false),
		})
	}

	/// Adds a pre-existing context without touching the call counters.
	pub(crate) fn seed_context(&self) -> Arc<SimContext> {
		let context = SimContext::new(Arc::clone(&self.stats), self.faults.clone());
		self.contexts.lock().push(Arc::clone(&context));
		context
	}
}

#[async_trait]
impl BrowserHandle for SimBrowser {
	fn contexts(&self) -> Vec<Arc<dyn ContextHandle>> {
		self.contexts
			.lock()
			.iter()
			.filter(|context| !context.is_closed())
			.map(|context| Arc::clone(context) as Arc<dyn ContextHandle>)
			.collect()
	}

	async fn new_context(&self) -> Result<Arc<dyn ContextHandle>> {
		let context = self.seed_context();
		self.stats.inc_contexts_created();
		Ok(context)
	}

	async fn close(&self) -> Result<()> {
		self.closed.store(true, Ordering::SeqCst);
		self.stats.inc_terminations();
		Ok(())
	}

	async fn detach(&self) -> Result<()> {
		self.stats.inc_detaches();
		Ok(())
	}
}

pub(crate) struct SimServer {
	endpoint: String,
	browser: Arc<SimBrowser>,
	stats: Arc<SimStats>,
}

impl SimServer {
	pub(crate) fn new(endpoint: String, browser: Arc<SimBrowser>, stats: Arc<SimStats>) -> Arc<Self> {
		Arc::new(Self {
			endpoint,
			browser,
			stats,
		})
	}
}

#[async_trait]
impl ServerHandle for SimServer {
	fn endpoint(&self) -> String {
		self.endpoint.clone()
	}

	fn browser(&self) -> Arc<dyn BrowserHandle> {
		Arc::clone(&self.browser) as Arc<dyn BrowserHandle>
	}

	async fn close(&self) -> Result<()> {
		self.stats.inc_server_closes();
		self.browser.close().await
	}
}

pub(crate) struct SimContext {
	stats: Arc<SimStats>,
	faults: Faults,
	pages: Mutex<Vec<Arc<SimPage>>>,
	closed: AtomicBool,
}

impl SimContext {
	fn new(stats: Arc<SimStats>, faults: Faults) -> Arc<Self> {
		Arc::new(Self {
			stats,
			faults,
			pages: Mutex::new(Vec::new()),
			closed: AtomicBool::new(false),
		})
	}

	/// Adds a pre-existing page without touching the call counters.
	pub(crate) fn seed_page(&self) -> Arc<SimPage> {
		let page = SimPage::new(Arc::clone(&self.stats), self.faults.clone());
		self.pages.lock().push(Arc::clone(&page));
		page
	}

	pub(crate) fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ContextHandle for SimContext {
	fn pages(&self) -> Vec<Arc<dyn PageHandle>> {
		self.pages
			.lock()
			.iter()
			.filter(|page| !page.is_closed())
			.map(|page| Arc::clone(page) as Arc<dyn PageHandle>)
			.collect()
	}

	async fn new_page(&self) -> Result<Arc<dyn PageHandle>> {
		let page = self.seed_page();
		self.stats.inc_pages_created();
		Ok(page)
	}

	async fn close(&self) -> Result<()> {
		self.closed.store(true, Ordering::SeqCst);
		// Pages die with their context, but only explicit page closes count.
		for page in self.pages.lock().iter() {
			page.mark_closed();
		}
		self.stats.inc_contexts_closed();
		if self.faults.fail_context_close {
			return Err(Error::Io(std::io::Error::other("simulated context close failure")));
		}
		Ok(())
	}
}

pub(crate) struct SimPage {
	stats: Arc<SimStats>,
	faults: Faults,
	url: Mutex<String>,
	closed: AtomicBool,
}

impl SimPage {
	fn new(stats: Arc<SimStats>, faults: Faults) -> Arc<Self> {
		Arc::new(Self {
			stats,
			faults,
			url: Mutex::new("about:blank".to_string()),
			closed: AtomicBool::new(false),
		})
	}

	pub(crate) fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	pub(crate) fn mark_closed(&self) {
		self.closed.store(true, Ordering::SeqCst);
	}
}

#[async_trait]
impl PageHandle for SimPage {
	fn url(&self) -> String {
		self.url.lock().clone()
	}

	async fn goto(&self, url: &str, options: GotoOptions) -> Result<()> {
		if self.faults.hang_navigation {
			let ms = options.effective_timeout_ms();
			tokio::time::sleep(Duration::from_millis(ms)).await;
			return Err(Error::Timeout {
				ms,
				condition: format!("navigation to {url}"),
			});
		}
		*self.url.lock() = url.to_string();
		Ok(())
	}

	async fn wait_for_selector(&self, selector: &str, options: WaitOptions) -> Result<()> {
		if self.faults.hang_selector {
			let ms = options.effective_timeout_ms();
			tokio::time::sleep(Duration::from_millis(ms)).await;
			return Err(Error::Timeout {
				ms,
				condition: format!("selector {selector}"),
			});
		}
		Ok(())
	}

	async fn pdf(&self, options: PdfOptions) -> Result<()> {
		std::fs::write(&options.path, PDF_STUB)?;
		self.stats.inc_pdf_exports();
		Ok(())
	}

	async fn close(&self) -> Result<()> {
		self.mark_closed();
		self.stats.inc_pages_closed();
		if self.faults.fail_page_close {
			return Err(Error::Io(std::io::Error::other("simulated page close failure")));
		}
		Ok(())
	}
}
