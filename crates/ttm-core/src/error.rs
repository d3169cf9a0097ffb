use thiserror::Error;

pub type TtmResult<T> = Result<T, TtmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TtmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative value for {what}: {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Timestamps are not sorted: index {index} is earlier than its predecessor")]
    Unsorted { index: usize },
}
