//! Discovery
//!
//! Runs several scanners against one VPC concurrently and merges what they
//! find. Scanners are independent, a failing one only costs its own results.

use super::graph::ResourceGraph;
use super::registry::{get_all_resource_types, get_scanner};
use super::scanner::{ResourceScanner, ScanContext, ScanError};
use futures::future::join_all;

/// Outcome of a multi-scanner run
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub graph: ResourceGraph,
    pub failures: Vec<ScanError>,
}

impl DiscoveryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the given scanners concurrently and merge their outputs
pub async fn scan_all(ctx: &ScanContext, scanners: &[&dyn ResourceScanner]) -> DiscoveryReport {
    let results = join_all(scanners.iter().map(|scanner| async move {
        tracing::debug!("Starting {} scan", scanner.resource_type());
        scanner.scan(ctx).await
    }))
    .await;

    let mut report = DiscoveryReport::default();
    for result in results {
        match result {
            Ok(output) => report.graph.merge(output),
            Err(e) => {
                tracing::warn!("{}", e);
                report.failures.push(e);
            }
        }
    }

    tracing::info!(
        "Discovery in {} finished: {} resources, {} edges, {} failed scanners",
        ctx.vpc_id,
        report.graph.resource_count(),
        report.graph.edges().len(),
        report.failures.len()
    );

    report
}

/// Discover resources of the given types (all registered types when empty)
pub async fn discover(
    ctx: &ScanContext,
    resource_types: &[String],
) -> anyhow::Result<DiscoveryReport> {
    let scanners: Vec<&dyn ResourceScanner> = if resource_types.is_empty() {
        get_all_resource_types()
            .into_iter()
            .filter_map(get_scanner)
            .collect()
    } else {
        resource_types
            .iter()
            .map(|t| {
                get_scanner(t).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown resource type: {} (known: {})",
                        t,
                        get_all_resource_types().join(", ")
                    )
                })
            })
            .collect::<anyhow::Result<_>>()?
    };

    Ok(scan_all(ctx, &scanners).await)
}
