//! Error types for the rebalancer.

use std::path::PathBuf;

use crate::execution::SubmissionReport;

/// All errors that can occur during rebalancer operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("invalid risk limits: {0}")]
    RiskConfig(#[from] weightbook_risk::RiskConfigError),

    #[error("planning failed: {0}")]
    Plan(#[from] weightbook::PlanError),

    #[error("broker error: {0}")]
    Broker(#[from] weightbook_broker::BrokerError),

    #[error("partial submission: {0}")]
    PartialSubmission(Box<SubmissionReport>),

    #[error("execution aborted: {0}")]
    Aborted(String),

    #[error("failed to write run stamp {path}: {source}")]
    Stamp {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("journal error: {0}")]
    Journal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error.
    ///
    /// `3` when some orders were accepted before one failed, `0` for a
    /// deliberate abort, `1` otherwise. Risk blocks are not errors; see
    /// [`RunOutcome::exit_code`](crate::execution::RunOutcome::exit_code).
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PartialSubmission(_) => 3,
            Error::Aborted(_) => 0,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(Error::Aborted("no".into()).exit_code(), 0);
        assert_eq!(Error::Config("bad".into()).exit_code(), 1);
        let partial = Error::PartialSubmission(Box::default());
        assert_eq!(partial.exit_code(), 3);
    }

    #[test]
    fn partial_submission_display() {
        let e = Error::PartialSubmission(Box::default());
        assert!(e.to_string().starts_with("partial submission: "));
    }
}
