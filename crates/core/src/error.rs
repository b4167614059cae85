#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid requirement clause '{clause}': {reason}")]
    InvalidClause { clause: String, reason: String },
    #[error("requirement clause '{0}' mixes ' or ' and ' and '; split it into separate clauses")]
    AmbiguousClause(String),
    #[error("invalid partial match threshold: {0}")]
    InvalidThreshold(String),
    #[error("duplicate condition name: {0}")]
    DuplicateCondition(String),

    #[error("rulebook error: {0}")]
    Rulebook(#[from] rulebook::RulebookError),
    #[error("invalid text: {0}")]
    Text(#[from] symcheck_types::TextError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
