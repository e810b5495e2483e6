//! Collaborators that surface failures: an error tracker and a toast sink.

use std::sync::Mutex;

/// Context attached to a reported error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTags {
    pub gallery_id: Option<String>,
    pub collection_id: Option<String>,
}

impl ErrorTags {
    pub fn gallery(gallery_id: impl Into<String>) -> Self {
        Self {
            gallery_id: Some(gallery_id.into()),
            collection_id: None,
        }
    }

    pub fn with_collection(mut self, collection_id: impl Into<String>) -> Self {
        self.collection_id = Some(collection_id.into());
        self
    }
}

/// Error-tracking sink
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &(dyn std::error::Error + 'static), tags: &ErrorTags);
}

/// User-visible, non-blocking notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    /// Failure toasts stay until dismissed
    pub auto_close: bool,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            auto_close: false,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn push_toast(&self, toast: Toast);
}

/// Reports errors as `tracing` events
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &(dyn std::error::Error + 'static), tags: &ErrorTags) {
        tracing::error!(
            gallery_id = tags.gallery_id.as_deref().unwrap_or_default(),
            collection_id = tags.collection_id.as_deref().unwrap_or_default(),
            error = %error,
            "gallery editor error"
        );
    }
}

#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn push_toast(&self, toast: Toast) {
        tracing::warn!(auto_close = toast.auto_close, "{}", toast.message);
    }
}

/// Keeps every report, for tests and headless drivers
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, ErrorTags)>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<(String, ErrorTags)> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &(dyn std::error::Error + 'static), tags: &ErrorTags) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push((error.to_string(), tags.clone()));
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn push_toast(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}
