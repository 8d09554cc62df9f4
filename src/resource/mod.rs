//! Resource discovery layer
//!
//! Each resource type is discovered by a [`ResourceScanner`] that queries the
//! provider, keeps only what lives in the target VPC and returns typed
//! [`Resource`] nodes plus the [`ResourceEdge`]s that tie them to the network.
//!
//! # Architecture
//!
//! - [`model`] - Digest, resource, tag and edge value types
//! - [`tags`] - Tag normalisation helpers
//! - [`scanner`] - Scanner contract, scan context and the two-call provider view
//! - [`ml`] - SageMaker notebook instance and training job scanners
//! - [`registry`] - Lookup table keyed by resource-type tag
//! - [`graph`] - Global merge of all scans
//! - [`discovery`] - Concurrent multi-scanner runs
//!
//! # Example
//!
//! ```ignore
//! use vpcscan::resource::{discover, ScanContext};
//!
//! async fn scan(ctx: &ScanContext) -> anyhow::Result<()> {
//!     let report = discover(ctx, &[]).await?;
//!     println!("{} resources", report.graph.resource_count());
//!     Ok(())
//! }
//! ```

pub mod discovery;
pub mod graph;
pub mod ml;
pub mod model;
pub mod registry;
pub mod scanner;
pub mod tags;

pub use discovery::{discover, scan_all, DiscoveryReport};
pub use graph::ResourceGraph;
pub use ml::{SageMakerNotebookScanner, SageMakerTrainingJobScanner};
pub use model::*;
pub use registry::{get_all_resource_types, get_scanner};
pub use scanner::{ResourceProvider, ResourceScanner, ScanContext, ScanError, ScanOutput};
pub use tags::{get_name_tag, get_tag, resource_tags};
