//! Login/signup form state.
//!
//! Holds the two inputs and whatever the last submission produced, and knows how
//! to turn that into the text shown to the user.

use crate::{Client, Error};
use portcullis_api_types::auth::request::AuthForm;
use portcullis_api_types::auth::response::AuthResponse;
use reqwest::Url;
use serde_json::Value;
use std::fmt;

const REDIRECT_PARAM: &str = "redirectTo";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Login,
    Signup,
}

impl Action {
    /// Shown when a failure carries no message of its own.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Signup => "Signup failed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Signup => "signup",
        })
    }
}

/// What the caller should do after a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Show [`Form::render`].
    Displayed,
    /// The submission succeeded and the page asked to go somewhere afterwards.
    Redirect(String),
    /// Show [`Form::render`], which now holds the error.
    Failed,
}

#[derive(Default)]
pub struct Form {
    pub username: String,
    pub password: String,
    response: Option<AuthResponse>,
    error: Option<String>,
    /// Raw body of the last failed response, whatever its shape.
    error_body: Option<Value>,
    redirect_to: Option<String>,
}

impl Form {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Navigate to `target` after a successful submission.
    #[must_use]
    pub fn with_redirect(mut self, target: Option<String>) -> Self {
        self.redirect_to = target.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn response(&self) -> Option<&AuthResponse> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn error_body(&self) -> Option<&Value> {
        self.error_body.as_ref()
    }

    #[must_use]
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    /// Forget the previous submission's response and error.
    pub fn reset(&mut self) {
        self.response = None;
        self.error = None;
        self.error_body = None;
    }

    pub async fn submit(&mut self, client: &Client, action: Action) -> Outcome {
        self.reset();

        let credentials = AuthForm {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let result = match action {
            Action::Login => client.login(&credentials).await,
            Action::Signup => client.signup(&credentials).await,
        };

        match result {
            Ok(response) => {
                // a `message` on a 2xx is taken to mean the server had something to say
                let redirect = self
                    .redirect_to
                    .clone()
                    .filter(|_| !response.has_message());
                self.response = Some(response);

                match redirect {
                    Some(target) => {
                        tracing::info!(%action, %target, "Redirecting after successful submission");
                        Outcome::Redirect(target)
                    },
                    None => Outcome::Displayed,
                }
            },
            Err(err) => {
                if let Error::Network(error) = &err {
                    tracing::error!(%action, ?error, "Could not reach the auth API");
                }
                self.fail(action, &err);
                Outcome::Failed
            },
        }
    }

    fn fail(&mut self, action: Action, err: &Error) {
        let message = err.message();
        self.error = Some(if message.is_empty() {
            action.failure_message().to_owned()
        } else {
            message
        });
        self.error_body = err.body().cloned();
    }

    /// The text shown for the current state; empty when nothing was submitted yet.
    #[must_use]
    pub fn render(&self) -> String {
        let (mut out, pretty) = match (&self.error, &self.response) {
            (Some(error), _) => (
                error.clone(),
                self.error_body.as_ref().and_then(|body| serde_json::to_string_pretty(body).ok()),
            ),
            (None, Some(response)) => (
                "Successful!".to_owned(),
                serde_json::to_string_pretty(response).ok(),
            ),
            (None, None) => return String::new(),
        };

        if let Some(pretty) = pretty {
            out.push('\n');
            out.push_str(&pretty);
        }

        out
    }
}

/// Reads the `redirectTo` query parameter of the page the form was opened from.
#[must_use]
pub fn redirect_target_from_url(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
