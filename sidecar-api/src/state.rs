use sidecar_logging::LogContext;

/// Shared application state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Request-path logging context, named `main` like the original module
    /// the handlers lived in.
    pub log: LogContext,
    /// Informational path of the hosting application bundle.
    pub app_path: String,
}

impl AppState {
    pub fn new(log: LogContext, app_path: impl Into<String>) -> Self {
        Self {
            log: log.named("main"),
            app_path: app_path.into(),
        }
    }
}
