use crate::category::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid pattern for category '{category}': {source}")]
    Invalid {
        category: Category,
        source: regex::Error,
    },

    #[error("category '{0}' is derived from diff structure and cannot carry a pattern")]
    Derived(Category),

    #[error("unknown category name: '{0}'")]
    UnknownCategory(String),
}

pub type PatternResult<T> = Result<T, PatternError>;
