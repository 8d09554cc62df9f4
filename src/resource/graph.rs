//! Resource graph
//!
//! Global merge of every scanner's output. Resources are keyed by digest
//! (first one seen wins), edges are kept once each in arrival order.

use super::model::{Resource, ResourceDigest, ResourceEdge};
use super::scanner::ScanOutput;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceGraph {
    #[serde(serialize_with = "serialize_resources")]
    resources: BTreeMap<ResourceDigest, Resource>,
    edges: Vec<ResourceEdge>,
    #[serde(skip)]
    seen_edges: HashSet<ResourceEdge>,
}

fn serialize_resources<S: serde::Serializer>(
    resources: &BTreeMap<ResourceDigest, Resource>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(resources.values())
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scan into the graph
    pub fn merge(&mut self, output: ScanOutput) {
        for resource in output.resources {
            self.resources
                .entry(resource.digest.clone())
                .or_insert(resource);
        }
        for edge in output.edges {
            if self.seen_edges.insert(edge.clone()) {
                self.edges.push(edge);
            }
        }
    }

    pub fn get(&self, digest: &ResourceDigest) -> Option<&Resource> {
        self.resources.get(digest)
    }

    /// Resources ordered by digest
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn edges(&self) -> &[ResourceEdge] {
        &self.edges
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Edges whose `from_node` is not a resource of the graph
    pub fn dangling_edges(&self) -> Vec<&ResourceEdge> {
        self.edges
            .iter()
            .filter(|e| !self.resources.contains_key(&e.from_node))
            .collect()
    }

    /// Number of resources per resource-type tag
    pub fn count_by_type(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for digest in self.resources.keys() {
            *counts.entry(digest.resource_type.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
