use thiserror::Error;

/// Errors surfaced by the roster pipeline.
///
/// Under-coverage is not an error: short days are reported through
/// [`crate::schedule::CoverageGap`] and logged.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("availability table could not be read: {0}")]
    InputUnreadable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("roster is empty: at least one person is needed to split the point budget")]
    EmptyRoster,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = ScheduleError::InputUnreadable("row 3: bad UTF-8".to_string());
        assert_eq!(err.to_string(), "availability table could not be read: row 3: bad UTF-8");

        let err = ScheduleError::InvalidConfig("daysInMonth must be between 1 and 31".to_string());
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_io_errors_convert() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here/roster.csv")?)
        }
        assert!(matches!(open_missing(), Err(ScheduleError::Io(_))));
    }
}
