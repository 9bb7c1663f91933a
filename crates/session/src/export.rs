//! Canned page task: navigate and export the rendered page to PDF.

use std::path::PathBuf;

use headful_provider::{GotoOptions, PageHandle, PdfOptions, WaitOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Navigate to a URL, optionally wait for an element, and write the rendered
/// page as a PDF.
///
/// Shaped for [`Session::with_page`]:
///
/// ```ignore
/// let export = PdfExport::new("https://example.com", "page.pdf");
/// session.with_page(|page| async move { export.run(page.as_ref()).await }).await?;
/// ```
///
/// [`Session::with_page`]: crate::session::Session::with_page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExport {
	/// URL to render.
	pub url: String,
	/// Selector that must be present before exporting.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wait_for: Option<String>,
	/// Output file path.
	pub path: PathBuf,
	/// Navigation deadline in milliseconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub goto_timeout_ms: Option<u64>,
	/// Selector-wait deadline in milliseconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wait_timeout_ms: Option<u64>,
}

impl PdfExport {
	/// Creates an export of `url` into `path`.
	pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		Self {
			url: url.into(),
			wait_for: None,
			path: path.into(),
			goto_timeout_ms: None,
			wait_timeout_ms: None,
		}
	}

	/// Requires `selector` to be present before the export.
	pub fn wait_for(mut self, selector: impl Into<String>) -> Self {
		self.wait_for = Some(selector.into());
		self
	}

	/// Sets the navigation deadline.
	pub fn goto_timeout_ms(mut self, ms: u64) -> Self {
		self.goto_timeout_ms = Some(ms);
		self
	}

	/// Sets the selector-wait deadline.
	pub fn wait_timeout_ms(mut self, ms: u64) -> Self {
		self.wait_timeout_ms = Some(ms);
		self
	}

	/// Runs the export against `page`.
	pub async fn run(&self, page: &dyn PageHandle) -> Result<()> {
		let mut goto = GotoOptions::new();
		if let Some(ms) = self.goto_timeout_ms {
			goto = goto.timeout_ms(ms);
		}
		page.goto(&self.url, goto).await?;

		if let Some(selector) = &self.wait_for {
			let mut wait = WaitOptions::new();
			if let Some(ms) = self.wait_timeout_ms {
				wait = wait.timeout_ms(ms);
			}
			page.wait_for_selector(selector, wait).await?;
		}

		debug!(
			target: "headful.session",
			url = %self.url,
			path = %self.path.display(),
			"exporting page to pdf"
		);
		page.pdf(PdfOptions::new(&self.path)).await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builder_sets_waits_and_deadlines() {
		let export = PdfExport::new("https://example.com", "out.pdf")
			.wait_for("input[name=\"email\"]")
			.goto_timeout_ms(5000)
			.wait_timeout_ms(2000);

		assert_eq!(export.url, "https://example.com");
		assert_eq!(export.wait_for.as_deref(), Some("input[name=\"email\"]"));
		assert_eq!(export.goto_timeout_ms, Some(5000));
		assert_eq!(export.wait_timeout_ms, Some(2000));
	}

	#[test]
	fn serialization_skips_unset_options() {
		let export = PdfExport::new("https://example.com", "out.pdf");
		let json = serde_json::to_string(&export).unwrap();
		assert!(json.contains("\"url\":\"https://example.com\""));
		assert!(!json.contains("waitFor"));
		assert!(!json.contains("gotoTimeoutMs"));
	}
}
