//! Capability surface for external browser-automation providers.
//!
//! The session layer never speaks a wire protocol itself; everything that
//! touches a real browser (process lifecycle, protocol framing, rendering)
//! goes through the traits in this crate. A provider implementation adapts
//! one concrete automation backend to this surface.

mod capability;
mod error;
mod options;

pub use capability::{
    AutomationProvider, BrowserHandle, ContextHandle, PageHandle, PersistentLaunch, ServerHandle,
};
pub use error::{Error, Result};
pub use options::{
    ConnectOptions, GotoOptions, LaunchOptions, PdfOptions, ServerOptions, WaitOptions,
    DEFAULT_TIMEOUT_MS,
};
