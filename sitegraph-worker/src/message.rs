use serde::{Deserialize, Serialize};
use sitegraph_core::{GraphDataset, InputFormat};

/// The single input message of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub content: String,
    pub format: InputFormat,
}

impl Request {
    pub fn new(content: impl Into<String>, format: InputFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }

    pub fn csv(content: impl Into<String>) -> Self {
        Self::new(content, InputFormat::Csv)
    }

    pub fn json(content: impl Into<String>) -> Self {
        Self::new(content, InputFormat::Json)
    }
}

/// The single reply to a request: a full dataset or an error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success { data: GraphDataset },
    Error { message: String },
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn into_result(self) -> Result<GraphDataset, String> {
        match self {
            Response::Success { data } => Ok(data),
            Response::Error { message } => Err(message),
        }
    }
}
