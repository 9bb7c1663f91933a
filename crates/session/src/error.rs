use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

/// Failures surfaced by session acquisition and page tasks.
///
/// Exactly one primary error is reported per failed operation; cleanup
/// failures are collected in a [`CleanupReport`] instead and never replace
/// the error that triggered the release.
///
/// [`CleanupReport`]: crate::session::CleanupReport
#[derive(Debug, Error)]
pub enum SessionError {
	/// Provider-level failure during acquisition or a page operation.
	#[error(transparent)]
	Provider(#[from] headful_provider::Error),

	/// Failure raised by caller-supplied task logic, passed through unchanged.
	#[error(transparent)]
	Task(#[from] anyhow::Error),

	/// Operation attempted on a session that was already released.
	#[error("session already released")]
	Released,
}

impl SessionError {
	/// Returns true when the underlying failure is a deadline exceeded.
	pub fn is_timeout(&self) -> bool {
		matches!(self, SessionError::Provider(err) if err.is_timeout())
	}

	/// Returns true when the underlying failure is an unreachable endpoint.
	pub fn is_connection_refused(&self) -> bool {
		matches!(self, SessionError::Provider(err) if err.is_connection_refused())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn provider_errors_pass_through_unwrapped() {
		let err = SessionError::from(headful_provider::Error::LaunchFailure(
			"port in use".to_string(),
		));
		assert_eq!(err.to_string(), "browser launch failed: port in use");
	}

	#[test]
	fn task_errors_pass_through_unwrapped() {
		let err = SessionError::from(anyhow::anyhow!("selector never appeared"));
		assert_eq!(err.to_string(), "selector never appeared");
		assert!(!err.is_timeout());
	}

	#[test]
	fn timeout_classification_sees_through_the_provider_variant() {
		let err = SessionError::from(headful_provider::Error::Timeout {
			ms: 5000,
			condition: "navigation to https://example.com".to_string(),
		});
		assert!(err.is_timeout());
		assert!(!err.is_connection_refused());
	}
}
