//! Client for the login and signup endpoints of the richmond.gg auth API.
//!
//! Every response is normalized: a 2xx turns into the parsed body (or the empty
//! value when the server didn't send JSON), anything else into an [`ApiError`].
//!
//! ```sh
//! PORTCULLIS_PASSWORD=x cargo r -p portcullis-client -F binary -- login george
//! ```

use portcullis_api_types::auth::request::AuthForm;
use portcullis_api_types::auth::response::AuthResponse;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;

mod error;
pub mod form;

pub use error::{ApiError, Error, Result};

pub const DEFAULT_API_BASE: &str = "https://api.george.richmond.gg";

const LOGIN_PATH: &str = "/api/login";
const SIGNUP_PATH: &str = "/api/signup";

#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl Client {
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self::from_reqwest(endpoint, reqwest::Client::new())
    }

    #[must_use]
    pub fn from_reqwest(endpoint: &str, client: reqwest::Client) -> Self {
        Self {
            http: client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn login(&self, credentials: &AuthForm) -> Result<AuthResponse> {
        self.post_json(LOGIN_PATH, credentials).await
    }

    pub async fn signup(&self, credentials: &AuthForm) -> Result<AuthResponse> {
        self.post_json(SIGNUP_PATH, credentials).await
    }

    /// POST `payload` as JSON to `path` under the API base.
    ///
    /// A successful response without a JSON content type yields `T::default()`.
    /// Failed responses become [`Error::Api`]; transport errors come back as
    /// [`Error::Network`] exactly as reqwest reported them.
    pub async fn post_json<P, T>(&self, path: &str, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{path}", self.endpoint);
        let body = serde_json::to_vec(payload).map_err(Error::Serialization)?;

        tracing::debug!(%url, "Sending auth request");

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = resp.status();

        if !status.is_success() {
            let err = Self::parse_error(resp).await;
            tracing::warn!(%url, status = status.as_u16(), error = %err.message, "Auth request failed");
            return Err(err.into());
        }

        if !is_json(resp.headers()) {
            tracing::debug!(%url, status = status.as_u16(), "Response has no JSON body");
            return Ok(T::default());
        }

        let bytes = resp.bytes().await?;
        let parsed = serde_json::from_slice(&bytes).map_err(Error::Deserialization)?;

        tracing::debug!(%url, status = status.as_u16(), "Auth request succeeded");

        Ok(parsed)
    }

    /// Never fails: a body that can't be read or parsed still produces an error
    /// with the generic message for the status.
    async fn parse_error(resp: Response) -> ApiError {
        let status = resp.status();

        if is_json(resp.headers()) {
            let parsed = match resp.bytes().await {
                Ok(bytes) => serde_json::from_slice(&bytes).ok(),
                Err(_) => None,
            };
            return match parsed {
                Some(body) => ApiError::from_json(status, body),
                None => ApiError::from_status(status),
            };
        }

        match resp.text().await {
            Ok(text) => ApiError::from_text(status, text),
            Err(_) => ApiError::from_status(status),
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}
