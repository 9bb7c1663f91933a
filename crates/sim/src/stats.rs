use std::sync::atomic::{AtomicUsize, Ordering};

macro_rules! counters {
	($($(#[$doc:meta])* $name:ident / $inc:ident),+ $(,)?) => {
		/// Counts of provider calls made against a [`SimProvider`].
		///
		/// Every counter records calls, not state: closing an already-closed
		/// handle still counts, and seeded contexts/pages never do.
		///
		/// [`SimProvider`]: crate::SimProvider
		#[derive(Debug, Default)]
		pub struct SimStats {
			$($name: AtomicUsize,)+
		}

		impl SimStats {
			$(
				$(#[$doc])*
				pub fn $name(&self) -> usize {
					self.$name.load(Ordering::SeqCst)
				}

				pub(crate) fn $inc(&self) {
					self.$name.fetch_add(1, Ordering::SeqCst);
				}
			)+
		}
	};
}

counters! {
	/// Successful `launch` calls.
	launches / inc_launches,
	/// Successful `launch_server` calls.
	server_launches / inc_server_launches,
	/// Successful `launch_persistent` calls.
	persistent_launches / inc_persistent_launches,
	/// Successful `connect` calls.
	connects / inc_connects,
	/// Successful `connect_over_debug` calls.
	debug_connects / inc_debug_connects,
	/// Browser terminations (`BrowserHandle::close`).
	terminations / inc_terminations,
	/// Detaches without termination (`BrowserHandle::detach`).
	detaches / inc_detaches,
	/// Server shutdowns (`ServerHandle::close`).
	server_closes / inc_server_closes,
	/// Contexts created through `new_context`.
	contexts_created / inc_contexts_created,
	/// Context closes (`ContextHandle::close`).
	contexts_closed / inc_contexts_closed,
	/// Pages created through `new_page`.
	pages_created / inc_pages_created,
	/// Page closes (`PageHandle::close`).
	pages_closed / inc_pages_closed,
	/// PDF files written (`PageHandle::pdf`).
	pdf_exports / inc_pdf_exports,
}
