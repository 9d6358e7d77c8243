use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("AI error: {0}")]
    Ai(#[from] AIError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("no question selected")]
    NoQuestionSelected,
}

#[derive(Error, Debug)]
pub enum AIError {
    #[error("Gemini API error: {0}")]
    Gemini(#[from] GeminiError),
    #[error("client unavailable: {0}")]
    Unavailable(String),
    #[error("mock error: {0}")]
    Mock(String),
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dataset: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question store is empty")]
    Empty,
}
