use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DuplicateEmail,
    InvalidCredentials,
    Unauthenticated,
    AlreadySaved,
    InvalidRequest(String),
    AssetLoad(String),
    MalformedState(String),
    Persistence(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email is already in use"),
            AppError::InvalidCredentials => write!(f, "Incorrect email or password"),
            AppError::Unauthenticated => write!(f, "You must be logged in to do this"),
            AppError::AlreadySaved => write!(f, "This post has already been saved"),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::AssetLoad(msg) => write!(f, "Failed to load asset: {}", msg),
            AppError::MalformedState(msg) => write!(f, "Malformed persisted state: {}", msg),
            AppError::Persistence(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
