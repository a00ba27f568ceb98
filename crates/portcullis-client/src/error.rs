use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// A non-2xx response from the auth API, normalized.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    /// From the JSON body's `message`, the plain text body, or [`ApiError::fallback_message`].
    pub message: String,
    /// The parsed JSON body, when the server sent one that parsed.
    pub body: Option<Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: String, body: Option<Value>) -> Self {
        Self {
            status,
            message,
            body,
        }
    }

    /// An error carrying only the generic message for `status`.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status, Self::fallback_message(status), None)
    }

    /// Parsed JSON error body. A string `message` field wins, anything else keeps the
    /// generic message but still hands the body back to the caller.
    #[must_use]
    pub fn from_json(status: StatusCode, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| Self::fallback_message(status), str::to_owned);
        Self::new(status, message, Some(body))
    }

    #[must_use]
    pub fn from_text(status: StatusCode, text: String) -> Self {
        if text.is_empty() {
            Self::from_status(status)
        } else {
            Self::new(status, text, None)
        }
    }

    #[must_use]
    pub fn fallback_message(status: StatusCode) -> String {
        format!("Request failed ({})", status.as_u16())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Transport failure, passed through untouched.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("Failed to serialize request payload")]
    Serialization(#[source] serde_json::Error),
    #[error("Failed to deserialize response body")]
    Deserialization(#[source] serde_json::Error),
}

impl Error {
    /// Text to show the user for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api(api) => api.message.clone(),
            other => other.to_string(),
        }
    }

    /// Raw body of a failed response, if there was a parseable one.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api(api) => api.body.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(api) => Some(api.status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
