//! Object-safe async traits a provider implements.
//!
//! Handles are shared (`Arc<dyn ...>`) and internally synchronized by the
//! provider; the session layer treats each handle as a single logical
//! resource and serializes its own use of it.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::options::{
    ConnectOptions, GotoOptions, LaunchOptions, PdfOptions, ServerOptions, WaitOptions,
};

/// Result of a persistent-profile launch: the browser plus the profile's
/// already-open default context.
pub struct PersistentLaunch {
    pub browser: Arc<dyn BrowserHandle>,
    pub context: Arc<dyn ContextHandle>,
}

/// Entry points for obtaining a browser handle.
#[async_trait]
pub trait AutomationProvider: Send + Sync {
    /// Spawns a local browser process.
    async fn launch(&self, options: LaunchOptions) -> Result<Arc<dyn BrowserHandle>>;

    /// Launches a browser server that exposes an endpoint for later connects.
    async fn launch_server(&self, options: ServerOptions) -> Result<Arc<dyn ServerHandle>>;

    /// Launches a browser bound to a persistent profile directory.
    async fn launch_persistent(
        &self,
        profile_dir: &Path,
        options: LaunchOptions,
    ) -> Result<PersistentLaunch>;

    /// Connects to a running browser over its WebSocket endpoint.
    async fn connect(
        &self,
        endpoint: &str,
        options: ConnectOptions,
    ) -> Result<Arc<dyn BrowserHandle>>;

    /// Connects to a running browser over its remote-debug-protocol endpoint.
    async fn connect_over_debug(
        &self,
        endpoint: &str,
        options: ConnectOptions,
    ) -> Result<Arc<dyn BrowserHandle>>;
}

/// A running or attached browser.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// Currently open browsing contexts, in creation order.
    fn contexts(&self) -> Vec<Arc<dyn ContextHandle>>;

    /// Opens a new browsing context.
    async fn new_context(&self) -> Result<Arc<dyn ContextHandle>>;

    /// Terminates the underlying browser process.
    async fn close(&self) -> Result<()>;

    /// Disconnects from the browser without terminating it.
    async fn detach(&self) -> Result<()>;
}

/// A launched browser server.
#[async_trait]
pub trait ServerHandle: Send + Sync {
    /// Endpoint URL clients connect to.
    fn endpoint(&self) -> String;

    /// Browser running inside the server.
    fn browser(&self) -> Arc<dyn BrowserHandle>;

    /// Stops the server and terminates its browser.
    async fn close(&self) -> Result<()>;
}

/// An isolated browsing context (cookies, cache, pages).
#[async_trait]
pub trait ContextHandle: Send + Sync {
    /// Currently open pages, in creation order.
    fn pages(&self) -> Vec<Arc<dyn PageHandle>>;

    /// Opens a new page.
    async fn new_page(&self) -> Result<Arc<dyn PageHandle>>;

    /// Closes the context and all of its pages.
    async fn close(&self) -> Result<()>;
}

/// A browser tab.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Current page URL.
    fn url(&self) -> String;

    /// Navigates to `url` within the configured deadline.
    async fn goto(&self, url: &str, options: GotoOptions) -> Result<()>;

    /// Waits until an element matching `selector` is present.
    async fn wait_for_selector(&self, selector: &str, options: WaitOptions) -> Result<()>;

    /// Renders the page to a PDF file.
    async fn pdf(&self, options: PdfOptions) -> Result<()>;

    /// Closes the page.
    async fn close(&self) -> Result<()>;
}
