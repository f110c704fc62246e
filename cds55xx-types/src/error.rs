pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Value {value} out of range [{min}, {max}]")]
    OutOfRange {
        value: i32,
        min: i32,
        max: i32,
    },
}
