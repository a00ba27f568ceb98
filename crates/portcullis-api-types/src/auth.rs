pub mod request {
    /// Credentials posted to both `/api/login` and `/api/signup`.
    #[derive(Clone, Default)]
    #[cfg_attr(feature = "client", derive(serde::Serialize))]
    #[cfg_attr(feature = "server", derive(serde::Deserialize))]
    pub struct AuthForm {
        pub username: String,
        pub password: String,
    }

    impl std::fmt::Debug for AuthForm {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("AuthForm")
                .field("username", &self.username)
                .field("password", &"<redacted>")
                .finish()
        }
    }
}

pub mod response {
    #[cfg(any(feature = "client", feature = "server"))]
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    /// Loosely structured success payload of the auth endpoints.
    ///
    /// Every field is optional and may hold any JSON value; servers disagree on
    /// whether `status` is a word or a number. The default value is the empty
    /// object, which is also what a successful response without a JSON body turns into.
    #[derive(Clone, Debug, Default, PartialEq)]
    #[cfg_attr(any(feature = "client", feature = "server"), derive(Deserialize, Serialize))]
    pub struct AuthResponse {
        #[cfg_attr(
            any(feature = "client", feature = "server"),
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        pub username: Option<Value>,
        #[cfg_attr(
            any(feature = "client", feature = "server"),
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        pub token: Option<Value>,
        /// Set by the server for errors and informational notices alike.
        #[cfg_attr(
            any(feature = "client", feature = "server"),
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        pub message: Option<Value>,
        #[cfg_attr(
            any(feature = "client", feature = "server"),
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        pub status: Option<Value>,
        /// Fields this crate doesn't know about, kept so the body survives a round trip.
        #[cfg_attr(any(feature = "client", feature = "server"), serde(flatten))]
        pub extra: Map<String, Value>,
    }

    impl AuthResponse {
        #[must_use]
        pub fn username(&self) -> Option<&str> {
            self.username.as_ref().and_then(Value::as_str)
        }

        #[must_use]
        pub fn token(&self) -> Option<&str> {
            self.token.as_ref().and_then(Value::as_str)
        }

        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.message.as_ref().and_then(Value::as_str)
        }

        /// Whether the server said anything in `message`. Empty strings, `false`,
        /// `0` and `null` count as silence.
        #[must_use]
        pub fn has_message(&self) -> bool {
            match &self.message {
                None | Some(Value::Null) => false,
                Some(Value::Bool(b)) => *b,
                Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
                Some(Value::String(s)) => !s.is_empty(),
                Some(Value::Array(_) | Value::Object(_)) => true,
            }
        }
    }
}
