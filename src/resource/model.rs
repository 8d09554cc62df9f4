//! Resource graph value types
//!
//! Immutable records describing discovered entities and the relations between
//! them. Equality and hashing are structural, so digests can key maps.

use serde::Serialize;

/// Resource-type tag of SageMaker notebook instances
pub const SAGEMAKER_NOTEBOOK_INSTANCE: &str = "aws_sagemaker_notebook_instance";
/// Resource-type tag of SageMaker training jobs
pub const SAGEMAKER_TRAINING_JOB: &str = "aws_sagemaker_training_job";
/// Resource-type tag of VPC subnets
pub const SUBNET: &str = "aws_subnet";

/// Group of machine learning resources
pub const GROUP_ML: &str = "ml";

/// Unique key of a resource within a scan
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceDigest {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl ResourceDigest {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One discovered entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Resource {
    pub digest: ResourceDigest,
    pub name: String,
    pub details: String,
    pub group: String,
    pub tags: Vec<ResourceTag>,
}

impl Resource {
    pub fn new(digest: ResourceDigest, name: impl Into<String>) -> Self {
        Self {
            digest,
            name: name.into(),
            details: String::new(),
            group: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<ResourceTag>) -> Self {
        self.tags = tags;
        self
    }
}

/// Directed relation between two digests
///
/// `to_node` may point at something no scanner reports itself (a subnet, for
/// the ML scanners); the global graph merge resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceEdge {
    pub from_node: ResourceDigest,
    pub to_node: ResourceDigest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ResourceEdge {
    pub fn new(from_node: ResourceDigest, to_node: ResourceDigest) -> Self {
        Self {
            from_node,
            to_node,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
