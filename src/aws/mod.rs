//! AWS API interaction module
//!
//! This module provides the plumbing the resource scanners sit on: credentials,
//! request signing, the HTTP client and the typed service calls.
//!
//! # Module Structure
//!
//! - [`auth`] - Credentials from the AWS provider chain, default region
//! - [`sigv4`] - AWS Signature Version 4 signing headers
//! - [`http`] - HTTP transport and user-facing error formatting
//! - [`error`] - Typed API errors
//! - [`client`] - Main AWS client (JSON and query protocols)
//! - [`sagemaker`] - SageMaker listing/describe/tag operations
//! - [`subnets`] - Subnet to VPC resolution
//!
//! # Example
//!
//! ```ignore
//! use vpcscan::aws::{client::AwsClient, subnets};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = AwsClient::new("default", "us-east-1").await?;
//!     let owner = subnets::describe_subnet(&client, "subnet-0abc").await;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod sagemaker;
pub mod sigv4;
pub mod subnets;

pub use client::{AwsClient, Service};
pub use error::AwsError;
pub use http::format_aws_error;
