//! Browser session acquisition and guaranteed-release lifecycle.
//!
//! This crate decides how a browser handle is obtained (spawn a local
//! process, connect to a running browser over a socket or debug-protocol
//! endpoint, launch a persistent profile, or launch a browser server), runs
//! caller work against a page inside that handle, and releases everything the
//! session created on every exit path, including task failure and drop.
//!
//! All browser work goes through the `headful-provider` capability traits;
//! nothing here speaks a wire protocol or owns a process directly.

pub mod error;
pub mod export;
pub mod extension;
pub mod session;
pub mod strategy;

pub use error::{Result, SessionError};
pub use export::PdfExport;
pub use extension::{UnpackedExtension, extension_page_url};
pub use session::{
	CleanupFailure, CleanupReport, CleanupStage, Endpoints, HandleOwnership, Session,
	SessionManager,
};
pub use strategy::{AcquisitionStrategy, StrategyInput, resolve_strategy};
