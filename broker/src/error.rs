//! Broker error types.

/// Errors that can occur during broker operations.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limit exceeded")]
    RateLimit,

    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("order error: {0}")]
    Order(String),
}

impl BrokerError {
    /// Map a non-success HTTP status and its message to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => BrokerError::Auth(message),
            403 | 422 => BrokerError::Rejected { status, message },
            404 => BrokerError::NotFound(message),
            429 => BrokerError::RateLimit,
            _ => BrokerError::Connection(format!("HTTP {status}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(BrokerError::from_status(401, "bad key"), BrokerError::Auth(_)));
        assert!(matches!(
            BrokerError::from_status(403, "insufficient buying power"),
            BrokerError::Rejected { status: 403, .. }
        ));
        assert!(matches!(BrokerError::from_status(404, "order"), BrokerError::NotFound(_)));
        assert!(matches!(BrokerError::from_status(429, ""), BrokerError::RateLimit));
        assert!(matches!(BrokerError::from_status(500, "oops"), BrokerError::Connection(_)));
    }

    #[test]
    fn rejected_display() {
        let err = BrokerError::from_status(422, "qty must be > 0");
        assert_eq!(err.to_string(), "request rejected (422): qty must be > 0");
    }
}
