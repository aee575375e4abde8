use serde::{Deserialize, Serialize};

/// Success body shared by every JSON endpoint: `{ "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Failure body: `{ "error": "<machine readable code>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(code: &str) -> Self {
        Self { error: code.to_string() }
    }
}
