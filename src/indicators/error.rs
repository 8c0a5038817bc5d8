use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("input series is empty")]
    EmptyInput,

    #[error("EMA span must be a positive integer, got {0}")]
    InvalidSpan(usize),

    #[error("invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },

    #[error("duplicate bar date {0}")]
    DuplicateDate(NaiveDate),

    #[error("bar dates are not ascending: {current} follows {previous}")]
    NonMonotonicDates {
        previous: NaiveDate,
        current: NaiveDate,
    },
}

impl IndicatorError {
    /// Malformed input (as opposed to a bad engine parameter).
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, IndicatorError::InvalidSpan(_))
    }
}
