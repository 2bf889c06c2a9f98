use thiserror::Error;

/// Failures surfaced by [`crate::api::FinanceApi`].
///
/// The backend reports business failures inside a successful HTTP exchange
/// (`message != "success"`), so those are kept apart from anything that went
/// wrong on the wire or while decoding the body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The envelope arrived but did not carry `message == "success"`.
    #[error("{0}")]
    Application(String),

    /// The request failed, or the body was not a valid envelope.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Text shown to the user, prefixed with what was being attempted.
    /// Transport failures always read as a connection error.
    pub fn describe(&self, prefix: &str) -> String {
        match self {
            ApiError::Application(error) => format!("{}: {}", prefix, error),
            ApiError::Transport(error) => format!("Erro de conexão: {}", error),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}
