//! vpcscan
//!
//! Discovers the AWS resources that live inside a VPC and assembles them into
//! a resource/relationship graph.
//!
//! - [`aws`] - credentials, request signing and typed service calls
//! - [`resource`] - scanners, the value model and the graph merge
//! - [`config`] - persisted user configuration

pub mod aws;
pub mod config;
pub mod resource;
