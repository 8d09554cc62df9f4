//! AWS Signature Version 4
//!
//! Header-based signing of fully buffered requests through `aws-sigv4`. The
//! signer adds `x-amz-date`, `authorization` and, for temporary credentials,
//! `x-amz-security-token`.

use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use chrono::{DateTime, Utc};

/// A request about to be signed
pub struct SigningRequest<'a> {
    pub method: &'a str,
    pub url: &'a str,
    /// Headers to sign, names lowercase. `x-amz-date` is added by the signer.
    pub headers: &'a [(String, String)],
    pub payload: &'a [u8],
}

/// Where the signature is valid: region and service signing name
pub struct SigningScope<'a> {
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
}

/// Headers to add to the request so it carries a valid signature
pub fn signature_headers(
    request: &SigningRequest<'_>,
    scope: &SigningScope<'_>,
    identity: &Identity,
) -> Result<Vec<(String, String)>, String> {
    let params: SigningParams<'_> = v4::SigningParams::builder()
        .identity(identity)
        .region(scope.region)
        .name(scope.service)
        .time(scope.time.into())
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| e.to_string())?
        .into();

    let signable = SignableRequest::new(
        request.method,
        request.url,
        request
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
        SignableBody::Bytes(request.payload),
    )
    .map_err(|e| e.to_string())?;

    let (instructions, _signature) = sign(signable, &params)
        .map_err(|e| e.to_string())?
        .into_parts();

    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
        .collect())
}
