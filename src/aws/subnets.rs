//! Subnet lookup
//!
//! Resolves the VPC that owns a subnet through EC2 `DescribeSubnets`.

use super::client::{AwsClient, Service};
use super::error::AwsError;
use serde::Deserialize;

/// One subnet from a `DescribeSubnets` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subnet {
    #[serde(rename = "subnetId")]
    pub subnet_id: String,
    #[serde(rename = "vpcId")]
    pub vpc_id: String,
    #[serde(rename = "cidrBlock", default)]
    pub cidr_block: Option<String>,
    #[serde(rename = "availabilityZone", default)]
    pub availability_zone: Option<String>,
}

/// Parsed `DescribeSubnets` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubnetDescription {
    #[serde(rename = "subnetSet", default)]
    subnet_set: SubnetSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SubnetSet {
    #[serde(rename = "item", default)]
    items: Vec<Subnet>,
}

impl SubnetDescription {
    pub fn subnets(&self) -> &[Subnet] {
        &self.subnet_set.items
    }

    /// Owning VPC of the first returned subnet
    pub fn vpc_id(&self) -> Option<&str> {
        self.subnets().first().map(|s| s.vpc_id.as_str())
    }

    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }
}

/// Fetch the description of one subnet
pub async fn fetch_subnet(
    client: &AwsClient,
    subnet_id: &str,
) -> Result<SubnetDescription, AwsError> {
    let params = [("SubnetId.1".to_string(), subnet_id.to_string())];
    let xml = client
        .query_request(Service::Ec2, "DescribeSubnets", &params)
        .await?;

    SubnetDescription::from_xml(&xml).map_err(|e| AwsError::Decode {
        operation: "DescribeSubnets".to_string(),
        message: e.to_string(),
    })
}

/// Describe a subnet, `None` when it cannot be resolved
///
/// Deleted subnets, subnets in another region and denied lookups all look the
/// same to the scanners: the item is filtered out, not reported.
pub async fn describe_subnet(client: &AwsClient, subnet_id: &str) -> Option<SubnetDescription> {
    match fetch_subnet(client, subnet_id).await {
        Ok(description) if !description.subnets().is_empty() => Some(description),
        Ok(_) => {
            tracing::debug!("Subnet {} returned no results", subnet_id);
            None
        }
        Err(e) => {
            tracing::debug!("Subnet {} could not be resolved: {}", subnet_id, e);
            None
        }
    }
}
