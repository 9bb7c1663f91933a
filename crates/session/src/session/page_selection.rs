//! Reuse-or-create selection of the session's working context and page.

use headful_provider::{BrowserHandle, ContextHandle};
use tracing::debug;

use super::types::{ContextSlot, PageSlot};
use crate::error::Result;

/// Picks the first existing context, or creates one the session then owns.
pub(crate) async fn select_context(handle: &dyn BrowserHandle) -> Result<ContextSlot> {
	if let Some(existing) = handle.contexts().into_iter().next() {
		debug!(target: "headful.session", "reusing existing browser context");
		return Ok(ContextSlot {
			handle: existing,
			owned: false,
		});
	}

	debug!(target: "headful.session", "no contexts available, creating new");
	Ok(ContextSlot {
		handle: handle.new_context().await?,
		owned: true,
	})
}

/// Picks the first existing page in `context`, or creates one the session
/// then owns.
pub(crate) async fn select_page(context: &dyn ContextHandle) -> Result<PageSlot> {
	if let Some(existing) = context.pages().into_iter().next() {
		debug!(target: "headful.session", url = %existing.url(), "reusing existing page");
		return Ok(PageSlot {
			handle: existing,
			owned: false,
		});
	}

	debug!(target: "headful.session", "no pages available, creating new");
	Ok(PageSlot {
		handle: context.new_page().await?,
		owned: true,
	})
}

#[cfg(test)]
mod tests {
	use headful_provider::{AutomationProvider, ConnectOptions, LaunchOptions};
	use headful_sim::SimProvider;

	use super::*;

	#[tokio::test]
	async fn fresh_browser_gets_owned_context_and_page() {
		let provider = SimProvider::new();
		let browser = provider.launch(LaunchOptions::new()).await.unwrap();

		let context = select_context(browser.as_ref()).await.unwrap();
		assert!(context.owned);

		let page = select_page(context.handle.as_ref()).await.unwrap();
		assert!(page.owned);
	}

	#[tokio::test]
	async fn seeded_browser_reuses_what_already_exists() {
		let provider = SimProvider::new().seed(1, 1);
		let browser = provider
			.connect("ws://127.0.0.1:3000/", ConnectOptions::new())
			.await
			.unwrap();

		let context = select_context(browser.as_ref()).await.unwrap();
		assert!(!context.owned);

		let page = select_page(context.handle.as_ref()).await.unwrap();
		assert!(!page.owned);
		assert_eq!(provider.stats().contexts_created(), 0);
		assert_eq!(provider.stats().pages_created(), 0);
	}
}
