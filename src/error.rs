use thiserror::Error;

/// Everything that can go wrong while handling a single queue entry.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to decode email request: {0}")]
    Decode(String),

    #[error("Email template not found for event type '{event_type}' and language '{language}'")]
    NotFound {
        event_type: String,
        language: String,
    },

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Template store error: {0}")]
    Connectivity(String),
}

impl EmailError {
    pub fn kind(&self) -> &'static str {
        match self {
            EmailError::Decode(_) => "decode",
            EmailError::NotFound { .. } => "not_found",
            EmailError::Transport(_) => "transport",
            EmailError::Connectivity(_) => "connectivity",
        }
    }
}

impl From<serde_json::Error> for EmailError {
    fn from(e: serde_json::Error) -> Self {
        EmailError::Decode(e.to_string())
    }
}

impl From<tokio_postgres::Error> for EmailError {
    fn from(e: tokio_postgres::Error) -> Self {
        EmailError::Connectivity(e.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for EmailError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        EmailError::Transport(e.to_string())
    }
}
