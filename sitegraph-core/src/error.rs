use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Required URL column (URL/Address) not found in CSV header")]
    MissingRequiredColumn,

    #[error("CSV file is empty or invalid: expected a header row and at least one data row")]
    EmptyOrInvalidInput,

    #[error("No valid HTML pages found in CSV file")]
    NoValidRows,

    #[error("JSON data is invalid or empty: expected a non-empty array of pages")]
    InvalidOrEmptyInput,

    #[error("No valid pages (with a url) found in the data")]
    NoValidPages,

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
