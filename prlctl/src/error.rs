use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CmdError {
    #[error("{0}")]
    Syntax(#[from] cmdopt::Error),

    #[error("Unrecognized option: {0}")]
    Unrecognized(String),

    #[error("An unknown option: {0}")]
    UnexpectedArgument(String),

    #[error("An incorrect value for {option} is specified: {value}")]
    BadValue { option: String, value: String },

    /// Bad value for an option whose text is wiped from argv.
    #[error("An incorrect value is specified for {0}")]
    BadSecret(String),

    #[error("Unable to simultaneously use {0} and {1}")]
    Conflict(&'static str, &'static str),

    #[error("{0}")]
    Message(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid usage")]
    InvalidUsage,

    #[error("Unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The diagnostic has already been written.
    #[error("")]
    Reported,

    /// Parsing is finished and the process should exit with this status.
    #[error("exit {0}")]
    Exit(i32),
}

impl CmdError {
    pub fn bad_value(option: &str, value: &str) -> Self {
        CmdError::BadValue {
            option: option.to_string(),
            value: value.to_string(),
        }
    }

    pub fn msg(text: impl Into<String>) -> Self {
        CmdError::Message(text.into())
    }
}

pub type Result<T> = std::result::Result<T, CmdError>;
