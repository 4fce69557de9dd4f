use std::time::Duration;

use thiserror::Error;

/// Why a collector could not describe its subsystem.
///
/// These never leave the aggregator: each one is absorbed into a degraded
/// [`Collected`](super::snapshot::Collected) slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    #[error("{0}")]
    Unavailable(String),

    #[error("no result within {0:?}")]
    TimedOut(Duration),

    #[error("collector panicked")]
    Panicked,
}

impl CollectorError {
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        CollectorError::Unavailable(msg.into())
    }
}

/// One OS subsystem query.
///
/// `Output::default()` is the placeholder a snapshot carries when the query
/// fails, so it must be a valid (if empty) value.
pub trait MetricCollector: Send + Sync {
    type Output: Default + Send + 'static;

    fn name(&self) -> &'static str;

    fn collect(&self) -> Result<Self::Output, CollectorError>;
}

pub(crate) fn ensure_supported() -> Result<(), CollectorError> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(CollectorError::unavailable(format!(
            "{} is not supported by the system probe",
            std::env::consts::OS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            CollectorError::unavailable("permission denied").to_string(),
            "permission denied"
        );
        assert_eq!(
            CollectorError::TimedOut(Duration::from_millis(250)).to_string(),
            "no result within 250ms"
        );
        assert_eq!(CollectorError::Panicked.to_string(), "collector panicked");
    }
}
