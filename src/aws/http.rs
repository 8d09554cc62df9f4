//! HTTP utilities for AWS API calls

use super::error::AwsError;
use anyhow::{Context, Result};
use reqwest::Client;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Wire protocol of an AWS service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// `application/x-amz-json-1.1` with an `X-Amz-Target` header
    Json,
    /// Form-encoded `Action=...` request, XML response
    Query,
}

/// A signed request ready to go on the wire
pub struct SignedRequest {
    pub url: String,
    pub operation: String,
    pub protocol: Protocol,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// HTTP client wrapper for AWS API calls
#[derive(Clone)]
pub struct AwsHttpClient {
    client: Client,
}

impl AwsHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("vpcscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// POST a signed request and return the raw response body
    pub async fn post(&self, request: SignedRequest) -> Result<String, AwsError> {
        tracing::debug!("POST {} ({})", request.url, request.operation);

        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|source| AwsError::Transport {
                operation: request.operation.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| AwsError::Transport {
            operation: request.operation.clone(),
            source,
        })?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!(
                "API error: {} {} - {}",
                request.operation,
                status,
                sanitize_for_log(&body)
            );
            return Err(match request.protocol {
                Protocol::Json => {
                    AwsError::from_json_body(&request.operation, status.as_u16(), &body)
                }
                Protocol::Query => {
                    AwsError::from_xml_body(&request.operation, status.as_u16(), &body)
                }
            });
        }

        Ok(body)
    }
}

/// Format an AWS API error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_aws_error(error: &AwsError) -> String {
    match error {
        AwsError::Api { status, code, .. } => {
            let code = code.as_deref().unwrap_or_default();
            if *status == 403
                || code.contains("AccessDenied")
                || code.contains("UnauthorizedOperation")
            {
                return "Permission denied. Check your IAM permissions.".to_string();
            }
            if code.contains("ExpiredToken")
                || code.contains("InvalidClientTokenId")
                || code.contains("SignatureDoesNotMatch")
                || *status == 401
            {
                return "Authentication failed. Check your AWS credentials.".to_string();
            }
            if code.contains("Throttling") || *status == 429 {
                return "Rate limit exceeded. Please try again later.".to_string();
            }
            if error.is_not_found() {
                return "Resource not found.".to_string();
            }
            if *status >= 500 {
                return "AWS service temporarily unavailable. Please try again.".to_string();
            }
            if *status == 400 {
                return "Invalid request. Check your parameters.".to_string();
            }
            "Request failed. Check your network connection and try again.".to_string()
        }
        AwsError::Transport { .. } => {
            "Could not reach AWS. Check your network connection and endpoint.".to_string()
        }
        AwsError::Decode { operation, .. } => {
            // Truncate and strip anything that is not plain printable text
            let sanitized = operation
                .chars()
                .filter(|c| c.is_ascii_graphic() || *c == ' ')
                .take(80)
                .collect::<String>();
            format!("Unexpected response from {}.", sanitized)
        }
        AwsError::Signing { .. } => {
            "Could not sign the request. Check your AWS credentials and endpoint.".to_string()
        }
    }
}
