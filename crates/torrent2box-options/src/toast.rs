//! Transient success and error banners.

use std::sync::Arc;

/// Renders short-lived banners in the active UI surface. Both operations are
/// fire-and-forget.
pub trait Toaster {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

impl<T: Toaster + ?Sized> Toaster for Arc<T> {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Shows toasts as log lines, for surfaces without a banner area.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogToaster;

impl Toaster for LogToaster {
    fn success(&self, message: &str) {
        log::info!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}
