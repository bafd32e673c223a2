use thiserror::Error;

/// Rejection reasons for a project name. Only one is reported per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("template name must not be empty")]
    Empty,
    #[error("template name contains illegal characters, please re-enter")]
    IllegalCharacters,
    #[error("project name already exists")]
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    #[error("unrecognized remote `{0}`")]
    UnknownRemote(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Reference(#[from] RefError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("extraction failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive entry `{0}` escapes the destination")]
    UnsafeEntry(String),
}
