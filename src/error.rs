use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Wrong user name or password")]
    InvalidCredentials,
    #[error("You need to log in first")]
    NotAuthenticated,
    #[error("You are not allowed to do that")]
    PermissionDenied,
    #[error("You cannot delete the account you are logged in with")]
    CannotDeleteSelf,
    #[error("Unknown account: {0}")]
    UnknownAccount(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the {0}")]
    MissingField(&'static str),
    #[error("The password must have at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("An account named \"{0}\" already exists")]
    DuplicateAccount(String),
    #[error("The message is empty")]
    EmptyNotification,
}

/// Failures of the generation service. The message shown to users is generic;
/// the payload keeps the cause for the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Sorry, the lesson search failed")]
    SearchFailed(String),
    #[error("Sorry, the content could not be generated")]
    GenerationFailed(String),
    #[error("Another request is still running")]
    Busy,
}

impl GatewayError {
    pub fn cause(&self) -> &str {
        match self {
            GatewayError::SearchFailed(cause) | GatewayError::GenerationFailed(cause) => cause,
            GatewayError::Busy => "busy",
        }
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
