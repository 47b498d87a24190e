//! Uniform JSON envelope wrapped around every API response

use serde::Serialize;

/// `{ success, message, data, error? }`
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Error section of a failed response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub description: String,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response carrying `data`
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    /// Successful response with `data: null`
    pub fn empty(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            error: None,
        }
    }

    /// Failed response with `data: null`
    pub fn failure(message: &str, code: u16, description: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(ErrorDetail {
                code,
                description: description.to_string(),
            }),
        }
    }
}
