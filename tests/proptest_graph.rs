//! Property-based tests using proptest
//!
//! These tests verify the graph merge and tag normalisation invariants using
//! randomized scan outputs.

use proptest::prelude::*;
use std::collections::HashSet;
use vpcscan::aws::sagemaker::Tag;
use vpcscan::resource::{
    resource_tags, Resource, ResourceDigest, ResourceEdge, ResourceGraph, ScanOutput,
    SAGEMAKER_NOTEBOOK_INSTANCE, SAGEMAKER_TRAINING_JOB, SUBNET,
};

/// Generate one (resource, edge) pair the way a scanner emits it
fn arb_link() -> impl Strategy<Value = (Resource, ResourceEdge)> {
    (
        "[a-z][a-z0-9-]{0,10}", // resource name
        prop_oneof![
            Just(SAGEMAKER_NOTEBOOK_INSTANCE),
            Just(SAGEMAKER_TRAINING_JOB)
        ],
        "subnet-[0-9]{1,2}",
    )
        .prop_map(|(name, resource_type, subnet)| {
            let digest =
                ResourceDigest::new(format!("arn:aws:sagemaker:::{}", name), resource_type);
            (
                Resource::new(digest.clone(), name).with_group("ml"),
                ResourceEdge::new(digest, ResourceDigest::new(subnet, SUBNET)),
            )
        })
}

/// Generate a scan output built through `push`
fn arb_output() -> impl Strategy<Value = ScanOutput> {
    prop::collection::vec(arb_link(), 0..30).prop_map(|links| {
        let mut output = ScanOutput::default();
        for (resource, edge) in links {
            output.push(resource, edge);
        }
        output
    })
}

fn arb_tags() -> impl Strategy<Value = Vec<Tag>> {
    prop::collection::vec(
        ("[A-Za-z]{1,8}", "[ -~]{0,12}").prop_map(|(key, value)| Tag { key, value }),
        0..20,
    )
}

proptest! {
    /// Every edge of a merged graph starts at a known resource
    #[test]
    fn merged_graph_has_no_dangling_edges(outputs in prop::collection::vec(arb_output(), 0..5)) {
        let mut graph = ResourceGraph::new();
        for output in outputs {
            graph.merge(output);
        }
        prop_assert!(graph.dangling_edges().is_empty());
    }

    /// One node per distinct digest, one entry per distinct edge
    #[test]
    fn merge_deduplicates(output in arb_output()) {
        let digests: HashSet<_> = output.resources.iter().map(|r| r.digest.clone()).collect();
        let edges: HashSet<_> = output.edges.iter().cloned().collect();

        let mut graph = ResourceGraph::new();
        graph.merge(output);

        prop_assert_eq!(graph.resource_count(), digests.len());
        prop_assert_eq!(graph.edges().len(), edges.len());
    }

    /// Merging the same scan again changes nothing
    #[test]
    fn merge_is_idempotent(output in arb_output()) {
        let mut once = ResourceGraph::new();
        once.merge(output.clone());

        let mut twice = ResourceGraph::new();
        twice.merge(output.clone());
        twice.merge(output);

        prop_assert_eq!(once.resource_count(), twice.resource_count());
        prop_assert_eq!(once.edges(), twice.edges());
    }

    /// Merge order does not change which nodes and edges exist
    #[test]
    fn merge_order_insensitive(a in arb_output(), b in arb_output()) {
        let mut ab = ResourceGraph::new();
        ab.merge(a.clone());
        ab.merge(b.clone());

        let mut ba = ResourceGraph::new();
        ba.merge(b);
        ba.merge(a);

        let digests = |g: &ResourceGraph| {
            g.resources().map(|r| r.digest.clone()).collect::<Vec<_>>()
        };
        let edges = |g: &ResourceGraph| g.edges().iter().cloned().collect::<HashSet<_>>();
        prop_assert_eq!(digests(&ab), digests(&ba));
        prop_assert_eq!(edges(&ab), edges(&ba));
    }

    /// Tag normalisation keeps every tag, in order
    #[test]
    fn tags_preserved_in_order(tags in arb_tags()) {
        let normalized = resource_tags(&tags);
        prop_assert_eq!(normalized.len(), tags.len());
        for (raw, tag) in tags.iter().zip(&normalized) {
            prop_assert_eq!(&raw.key, &tag.key);
            prop_assert_eq!(&raw.value, &tag.value);
        }
    }
}
