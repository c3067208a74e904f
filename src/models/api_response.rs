use serde::Deserialize;

/// Standard API response envelope from the Omada controller.
///
/// Every endpoint wraps its payload the same way: a numeric `errorCode`
/// (zero on success), an optional human-readable message, and the payload
/// itself under `result`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Result code. Zero indicates success.
    #[serde(rename = "errorCode")]
    pub error_code: i64,

    /// Error message, if any.
    pub msg: Option<String>,

    /// The actual data returned, if any.
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload, or describes why there is none.
    ///
    /// The caller decides which error kind the description maps to: a
    /// non-zero `errorCode` during login is an authentication failure, while
    /// the same envelope on any other endpoint is a connection-level fault.
    pub fn into_result(self) -> Result<T, String> {
        if self.error_code != 0 {
            return Err(self
                .msg
                .unwrap_or_else(|| format!("errorCode {}", self.error_code)));
        }
        self.result.ok_or_else(|| "response has no result".to_string())
    }
}
