//! Best-effort release of session-owned browser resources.

use std::fmt;
use std::sync::Arc;

use headful_provider::{BrowserHandle, ServerHandle};
use tracing::{debug, warn};

use super::types::{ContextSlot, HandleOwnership, PageSlot};

/// Release step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStage {
	Page,
	Context,
	Server,
	Browser,
}

impl fmt::Display for CleanupStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CleanupStage::Page => write!(f, "page"),
			CleanupStage::Context => write!(f, "context"),
			CleanupStage::Server => write!(f, "server"),
			CleanupStage::Browser => write!(f, "browser"),
		}
	}
}

/// A single failed release step.
#[derive(Debug)]
pub struct CleanupFailure {
	pub stage: CleanupStage,
	pub error: headful_provider::Error,
}

/// Diagnostic record of a release pass.
///
/// Release never fails: individual close failures are recorded here (and
/// logged) so they cannot mask the error that triggered the release.
#[derive(Debug, Default)]
pub struct CleanupReport {
	failures: Vec<CleanupFailure>,
}

impl CleanupReport {
	/// Returns true when every release step succeeded (or nothing needed
	/// releasing).
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}

	/// Failed release steps, in the order they were attempted.
	pub fn failures(&self) -> &[CleanupFailure] {
		&self.failures
	}

	fn record(&mut self, stage: CleanupStage, error: headful_provider::Error) {
		warn!(
			target: "headful.session",
			%stage,
			error = %error,
			"cleanup step failed, continuing"
		);
		self.failures.push(CleanupFailure { stage, error });
	}
}

/// Closes everything the session owns, in reverse order of creation: page,
/// then context, then the browser or server itself. Every step runs even
/// when an earlier one fails.
pub(crate) async fn run_cleanup(
	page: Option<PageSlot>,
	context: Option<ContextSlot>,
	server: Option<Arc<dyn ServerHandle>>,
	handle: Arc<dyn BrowserHandle>,
	ownership: HandleOwnership,
) -> CleanupReport {
	let mut report = CleanupReport::default();

	if let Some(slot) = page {
		if slot.owned {
			if let Err(err) = slot.handle.close().await {
				report.record(CleanupStage::Page, err);
			}
		}
	}

	if let Some(slot) = context {
		if slot.owned {
			if let Err(err) = slot.handle.close().await {
				report.record(CleanupStage::Context, err);
			}
		}
	}

	match ownership {
		HandleOwnership::Owned => {
			if let Some(server) = server {
				debug!(target: "headful.session", "shutting down launched browser server");
				if let Err(err) = server.close().await {
					report.record(CleanupStage::Server, err);
				}
			} else {
				debug!(target: "headful.session", "terminating owned browser");
				if let Err(err) = handle.close().await {
					report.record(CleanupStage::Browser, err);
				}
			}
		}
		HandleOwnership::Attached => {
			debug!(target: "headful.session", "detaching from attached browser");
			if let Err(err) = handle.detach().await {
				report.record(CleanupStage::Browser, err);
			}
		}
	}

	report
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn report_keeps_failures_in_attempt_order() {
		let mut report = CleanupReport::default();
		assert!(report.is_clean());

		report.record(
			CleanupStage::Page,
			headful_provider::Error::LaunchFailure("page close failed".to_string()),
		);
		report.record(
			CleanupStage::Browser,
			headful_provider::Error::LaunchFailure("terminate failed".to_string()),
		);

		assert!(!report.is_clean());
		let stages: Vec<_> = report.failures().iter().map(|f| f.stage).collect();
		assert_eq!(stages, vec![CleanupStage::Page, CleanupStage::Browser]);
	}

	#[test]
	fn stages_display_as_lowercase_names() {
		assert_eq!(CleanupStage::Page.to_string(), "page");
		assert_eq!(CleanupStage::Server.to_string(), "server");
	}
}
