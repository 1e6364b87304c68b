use http::StatusCode;

/// How a failure is reported to API callers
///
/// Feature crates implement this for their error enums; the server turns
/// it into the `{"ok": false, "error": ...}` envelope without knowing the
/// concrete error type.
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    /// Stable snake_case tag for logs (e.g. `connection_error`)
    fn error_type(&self) -> &'static str;

    /// Text placed in the envelope's `error` field
    fn client_message(&self) -> String {
        self.to_string()
    }
}
