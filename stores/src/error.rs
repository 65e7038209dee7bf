use thiserror::Error;
use worklink_shared::ErrorBody;

/// What can go wrong talking to a backend service.
///
/// `Unauthorized` is never surfaced per call site; the request layer clears
/// the session globally and callers just see the request fail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unauthorized")]
    Unauthorized,
}

impl ApiError {
    /// Build an error from a non-2xx response. Validation errors carry a
    /// `message` field in the body; anything else falls back to the status.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("API error: {}", status));
        ApiError::Server { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_server_message_field() {
        let err = ApiError::from_status_body(422, r#"{"message":"Email already registered"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 422,
                message: "Email already registered".into()
            }
        );
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn falls_back_to_status_on_opaque_body() {
        let err = ApiError::from_status_body(500, "<html>oops</html>");
        assert_eq!(err.to_string(), "API error: 500");
    }

    #[test]
    fn status_401_is_unauthorized_regardless_of_body() {
        assert!(ApiError::from_status_body(401, r#"{"message":"expired"}"#).is_unauthorized());
    }
}
