//! AWS API errors
//!
//! Typed failures returned by the signed HTTP layer. The scanners wrap these
//! in a [`ScanError`](crate::resource::ScanError) so a caller can log and move on.

use serde::Deserialize;
use thiserror::Error;

/// Failure of one AWS API operation
#[derive(Debug, Error)]
pub enum AwsError {
    /// The request never produced an HTTP response
    #[error("{operation}: request could not be sent: {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("{operation}: API request failed: {status}{}", code_suffix(.code))]
    Api {
        operation: String,
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    /// The response body did not have the expected shape
    #[error("{operation}: unexpected response: {message}")]
    Decode { operation: String, message: String },

    /// The request could not be signed or addressed
    #[error("{operation}: could not sign request: {message}")]
    Signing { operation: String, message: String },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl AwsError {
    pub fn operation(&self) -> &str {
        match self {
            AwsError::Transport { operation, .. }
            | AwsError::Api { operation, .. }
            | AwsError::Decode { operation, .. }
            | AwsError::Signing { operation, .. } => operation,
        }
    }

    /// HTTP status, when the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            AwsError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// AWS error code such as `AccessDeniedException` or `InvalidSubnetID.NotFound`
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404) || self.code().is_some_and(|c| c.contains("NotFound"))
    }

    /// Build an [`AwsError::Api`] from a JSON-protocol error body
    pub(crate) fn from_json_body(operation: &str, status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct JsonError {
            #[serde(rename = "__type")]
            kind: Option<String>,
            #[serde(alias = "Message")]
            message: Option<String>,
        }

        let parsed = serde_json::from_str::<JsonError>(body).ok();
        let (code, message) = match parsed {
            // "com.amazon.coral.service#AccessDeniedException" -> "AccessDeniedException"
            Some(e) => (
                e.kind.map(|k| k.rsplit('#').next().unwrap_or(&k).to_string()),
                e.message,
            ),
            None => (None, None),
        };

        AwsError::Api {
            operation: operation.to_string(),
            status,
            code,
            message,
        }
    }

    /// Build an [`AwsError::Api`] from a query-protocol XML error body
    pub(crate) fn from_xml_body(operation: &str, status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorResponse {
            #[serde(rename = "Errors")]
            errors: Errors,
        }
        #[derive(Deserialize)]
        struct Errors {
            #[serde(rename = "Error", default)]
            error: Vec<ErrorDetail>,
        }
        #[derive(Deserialize)]
        struct ErrorDetail {
            #[serde(rename = "Code")]
            code: Option<String>,
            #[serde(rename = "Message")]
            message: Option<String>,
        }

        let detail = quick_xml::de::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.errors.error.into_iter().next());

        AwsError::Api {
            operation: operation.to_string(),
            status,
            code: detail.as_ref().and_then(|d| d.code.clone()),
            message: detail.and_then(|d| d.message),
        }
    }
}
