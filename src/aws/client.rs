//! AWS Client
//!
//! Main client for interacting with AWS APIs, combining credentials, request
//! signing and HTTP functionality. One client is bound to one account/region.

use super::auth::{load_credentials, validate_region, Credentials};
use super::error::AwsError;
use super::http::{AwsHttpClient, Protocol, SignedRequest};
use super::sigv4::{self, SigningRequest, SigningScope};
use anyhow::{Context, Result};
use aws_smithy_runtime_api::client::identity::Identity;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// AWS services the scanners talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    SageMaker,
    Ec2,
}

impl Service {
    /// Name used in the SigV4 credential scope
    pub fn signing_name(self) -> &'static str {
        match self {
            Service::SageMaker => "sagemaker",
            Service::Ec2 => "ec2",
        }
    }

    pub fn protocol(self) -> Protocol {
        match self {
            Service::SageMaker => Protocol::Json,
            Service::Ec2 => Protocol::Query,
        }
    }

    /// Prefix of the `X-Amz-Target` header (JSON protocol)
    fn target_prefix(self) -> &'static str {
        match self {
            Service::SageMaker => "SageMaker",
            Service::Ec2 => "",
        }
    }

    /// API version sent with every query-protocol request
    fn api_version(self) -> &'static str {
        match self {
            Service::SageMaker => "2017-07-24",
            Service::Ec2 => "2016-11-15",
        }
    }

    fn default_endpoint(self, region: &str) -> String {
        match self {
            Service::SageMaker => format!("https://api.sagemaker.{}.amazonaws.com/", region),
            Service::Ec2 => format!("https://ec2.{}.amazonaws.com/", region),
        }
    }
}

/// Main AWS client
#[derive(Clone)]
pub struct AwsClient {
    identity: Identity,
    http: AwsHttpClient,
    pub region: String,
    endpoint_override: Option<Url>,
}

impl AwsClient {
    /// Create a new AWS client for a profile and region
    ///
    /// Credentials are resolved once per client.
    pub async fn new(profile: &str, region: &str) -> Result<Self> {
        if !validate_region(region) {
            anyhow::bail!("Invalid AWS region: {:?}", region);
        }
        let credentials = load_credentials(profile, region)
            .await
            .context("Failed to initialize AWS credentials")?;
        Self::with_credentials(credentials, region)
    }

    /// Create a client from already resolved credentials
    pub fn with_credentials(credentials: Credentials, region: &str) -> Result<Self> {
        if !validate_region(region) {
            anyhow::bail!("Invalid AWS region: {:?}", region);
        }

        let http = AwsHttpClient::new()?;

        Ok(Self {
            identity: credentials.into(),
            http,
            region: region.to_string(),
            endpoint_override: None,
        })
    }

    /// Send every service to one base URL (local emulators, tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
        self.endpoint_override = Some(url);
        Ok(self)
    }

    /// Endpoint used for a service
    pub fn endpoint_url(&self, service: Service) -> String {
        match &self.endpoint_override {
            Some(url) => url.to_string(),
            None => service.default_endpoint(&self.region),
        }
    }

    /// Call a JSON-protocol operation and decode its output
    pub async fn json_request<T: DeserializeOwned>(
        &self,
        service: Service,
        operation: &str,
        input: &Value,
    ) -> Result<T, AwsError> {
        let body = input.to_string();
        let target = format!("{}.{}", service.target_prefix(), operation);
        let extra = [
            ("content-type", "application/x-amz-json-1.1"),
            ("x-amz-target", target.as_str()),
        ];

        let request = self.sign(service, operation, &extra, body)?;
        let response = self.http.post(request).await?;

        // Some operations answer with an empty body
        let response = if response.trim().is_empty() {
            "{}"
        } else {
            response.as_str()
        };

        serde_json::from_str(response).map_err(|e| AwsError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
        })
    }

    /// Call a query-protocol operation and return the raw XML response
    pub async fn query_request(
        &self,
        service: Service,
        action: &str,
        params: &[(String, String)],
    ) -> Result<String, AwsError> {
        // The serializer is not Send and must be gone before the await
        let body = {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            form.append_pair("Action", action);
            form.append_pair("Version", service.api_version());
            for (key, value) in params {
                form.append_pair(key, value);
            }
            form.finish()
        };

        let extra = [(
            "content-type",
            "application/x-www-form-urlencoded; charset=utf-8",
        )];

        let request = self.sign(service, action, &extra, body)?;
        self.http.post(request).await
    }

    fn sign(
        &self,
        service: Service,
        operation: &str,
        extra_headers: &[(&str, &str)],
        body: String,
    ) -> Result<SignedRequest, AwsError> {
        let endpoint = self.endpoint_url(service);
        let url = Url::parse(&endpoint).map_err(|e| AwsError::Signing {
            operation: operation.to_string(),
            message: format!("invalid endpoint: {}", e),
        })?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(AwsError::Signing {
                    operation: operation.to_string(),
                    message: "endpoint has no host".to_string(),
                })
            }
        };

        let mut headers = vec![("host".to_string(), host)];
        headers.extend(
            extra_headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );

        let signature = sigv4::signature_headers(
            &SigningRequest {
                method: "POST",
                url: &endpoint,
                headers: &headers,
                payload: body.as_bytes(),
            },
            &SigningScope {
                region: &self.region,
                service: service.signing_name(),
                time: Utc::now(),
            },
            &self.identity,
        )
        .map_err(|message| AwsError::Signing {
            operation: operation.to_string(),
            message,
        })?;

        // reqwest derives Host from the URL
        headers.retain(|(name, _)| name != "host");
        headers.extend(signature);

        Ok(SignedRequest {
            url: endpoint,
            operation: operation.to_string(),
            protocol: service.protocol(),
            headers,
            body,
        })
    }
}
