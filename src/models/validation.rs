use thiserror::Error;

/// 验证错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown type filter: {0} (expected movie, series, episode or game)")]
    UnknownMovieType(String),

    #[error("Year filter is too long (max {max} characters)")]
    YearFilterTooLong { max: usize },

    #[error("Search term is too long (max {max} characters)")]
    SearchTermTooLong { max: usize },

    #[error("Invalid page number: {0}")]
    InvalidPage(String),
}

/// 验证器trait
pub trait Validator {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;
}

/// 字符串长度验证
pub struct StringValidator;

impl StringValidator {
    pub fn max_chars(value: &str, max: usize) -> bool {
        value.chars().count() <= max
    }
}
