use thiserror::Error;

/// Mistakes in what the user typed. Reported, never fatal, never mutate the list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("☹ OOPS!!! I'm sorry, but I don't know what that means :-(")]
    UnknownCommand,
    #[error("☹ OOPS!!! The description of a task cannot be empty.")]
    EmptyDescription,
    #[error("☹ OOPS!!! The search term is missing.")]
    EmptySearchTerm,
    #[error("☹ OOPS!!! Please enter a valid task index value.")]
    IndexOutOfBounds,
    #[error("☹ OOPS!!! Please only enter numeric values for the task index.")]
    InvalidIndex,
    #[error("☹ OOPS!!! The index of the task is missing.")]
    MissingIndex,
    #[error("☹ OOPS!!! Please input the deadline in the following format: \"{}\".", crate::date::INPUT_FORMAT_HINT)]
    InvalidDate,
    #[error("☹ OOPS!!! The deadline for the task must be specified with \"/by\".")]
    MissingDeadlineParam,
    #[error("☹ OOPS!!! The event parameter must be specified with \"/at\".")]
    MissingEventParam,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A persisted line that could not be turned back into a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct CorruptRecord {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum DateFormatError {
    #[error("'{input}' does not match the deadline format")]
    Shape { input: String },
    #[error("'{input}' is not a valid date and time")]
    Value {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}
