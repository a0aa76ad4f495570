use thiserror::Error;

/// Everything that can abort the parse of a task document.
///
/// Line numbers are 1-based and refer to the source document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no `{heading}` heading found")]
    NoTasksHeading { heading: String },

    #[error("task `{task}` has neither a script nor a dependency")]
    CommandlessTask { task: String },

    #[error("line {line}: {attribute} already set for task `{task}`")]
    DuplicateAttribute {
        task: String,
        attribute: &'static str,
        line: usize,
    },

    #[error("line {line}: invalid run value `{value}` for task `{task}`, expected `always` or `once`")]
    InvalidRunValue {
        task: String,
        value: String,
        line: usize,
    },

    #[error("line {line}: task `{task}` has more than one code block")]
    MultipleCodeBlocks { task: String, line: usize },

    #[error("line {line}: code block of task `{task}` is never closed")]
    UnterminatedCodeBlock { task: String, line: usize },

    #[error("could not read task document: {0}")]
    Io(#[from] std::io::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;
