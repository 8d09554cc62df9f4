//! Scanner contract
//!
//! Every resource type is discovered by one [`ResourceScanner`]. A scan is a
//! single call that returns both the resources and the edges it found, so
//! there is no call ordering to get wrong.

use super::model::{Resource, ResourceEdge};
use crate::aws::{AwsClient, AwsError};
use async_trait::async_trait;
use thiserror::Error;

/// Default number of items a scanner works on at once
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Everything a scanner needs: the signed client and the VPC to scope to
#[derive(Clone)]
pub struct ScanContext {
    client: AwsClient,
    pub vpc_id: String,
    pub concurrency: usize,
}

impl ScanContext {
    pub fn new(client: AwsClient, vpc_id: &str) -> Self {
        Self {
            client,
            vpc_id: vpc_id.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Client bound to the scanned account and region
    pub fn client(&self) -> &AwsClient {
        &self.client
    }

    pub fn region(&self) -> &str {
        &self.client.region
    }
}

/// Resources and edges found by one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub resources: Vec<Resource>,
    pub edges: Vec<ResourceEdge>,
}

impl ScanOutput {
    /// Record a resource together with the edge that qualified it
    ///
    /// The edge must start at the resource, so every edge's `from_node`
    /// appears in `resources`.
    pub fn push(&mut self, resource: Resource, edge: ResourceEdge) {
        debug_assert_eq!(edge.from_node, resource.digest);
        self.resources.push(resource);
        self.edges.push(edge);
    }

    pub fn extend(&mut self, other: ScanOutput) {
        self.resources.extend(other.resources);
        self.edges.extend(other.edges);
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.edges.is_empty()
    }
}

/// A scanner that could not complete
#[derive(Debug, Error)]
#[error("{resource_type} scan failed: {source}")]
pub struct ScanError {
    pub resource_type: &'static str,
    #[source]
    pub source: AwsError,
}

impl ScanError {
    pub fn new(resource_type: &'static str, source: AwsError) -> Self {
        Self {
            resource_type,
            source,
        }
    }
}

/// Discovers every resource of one type that lives in the context's VPC
#[async_trait]
pub trait ResourceScanner: Send + Sync {
    /// Resource-type tag of the resources this scanner reports
    fn resource_type(&self) -> &'static str;

    /// Human readable name used in log messages
    fn display_name(&self) -> &'static str;

    async fn scan(&self, ctx: &ScanContext) -> Result<ScanOutput, ScanError>;
}

/// Two-call view over a scanner: `get_resources()` then `get_relations()`
///
/// A failed scan is logged and reported as empty, so one bad resource type
/// never stops a wider scan. Every `get_resources()` call replaces the stored
/// relations.
pub struct ResourceProvider<S> {
    scanner: S,
    ctx: ScanContext,
    relations_found: Vec<ResourceEdge>,
}

impl<S: ResourceScanner> ResourceProvider<S> {
    pub fn new(scanner: S, ctx: ScanContext) -> Self {
        Self {
            scanner,
            ctx,
            relations_found: Vec::new(),
        }
    }

    pub async fn get_resources(&mut self) -> Vec<Resource> {
        match self.scanner.scan(&self.ctx).await {
            Ok(output) => {
                self.relations_found = output.edges;
                output.resources
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.relations_found.clear();
                Vec::new()
            }
        }
    }

    /// Edges found by the last `get_resources()` call
    pub fn get_relations(&self) -> &[ResourceEdge] {
        &self.relations_found
    }
}
