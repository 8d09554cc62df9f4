//! Machine learning scanners
//!
//! SageMaker notebook instances and training jobs do not report their VPC
//! directly, only their subnets. Each subnet is resolved to its owning VPC and
//! compared with the VPC being scanned.

use super::model::{
    Resource, ResourceDigest, ResourceEdge, GROUP_ML, SAGEMAKER_NOTEBOOK_INSTANCE,
    SAGEMAKER_TRAINING_JOB, SUBNET,
};
use super::scanner::{ResourceScanner, ScanContext, ScanError, ScanOutput};
use super::tags::resource_tags;
use crate::aws::sagemaker::{NotebookInstanceSummary, SageMaker, TrainingJobSummary};
use crate::aws::{subnets, AwsError};
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};

/// True when the subnet resolves and belongs to the scanned VPC
async fn subnet_in_vpc(ctx: &ScanContext, subnet_id: &str) -> bool {
    subnets::describe_subnet(ctx.client(), subnet_id)
        .await
        .is_some_and(|description| description.vpc_id() == Some(ctx.vpc_id.as_str()))
}

fn subnet_edge(from: &ResourceDigest, subnet_id: &str) -> ResourceEdge {
    ResourceEdge::new(from.clone(), ResourceDigest::new(subnet_id, SUBNET))
}

fn merge(outputs: Vec<ScanOutput>) -> ScanOutput {
    outputs
        .into_iter()
        .fold(ScanOutput::default(), |mut acc, output| {
            acc.extend(output);
            acc
        })
}

// =============================================================================
// Notebook instances
// =============================================================================

/// SageMaker notebook instances attached to a subnet of the VPC
#[derive(Debug, Default, Clone, Copy)]
pub struct SageMakerNotebookScanner;

#[async_trait]
impl ResourceScanner for SageMakerNotebookScanner {
    fn resource_type(&self) -> &'static str {
        SAGEMAKER_NOTEBOOK_INSTANCE
    }

    fn display_name(&self) -> &'static str {
        "Sagemaker Notebook instances"
    }

    async fn scan(&self, ctx: &ScanContext) -> Result<ScanOutput, ScanError> {
        let sagemaker = SageMaker::new(ctx.client());

        let instances = sagemaker
            .list_notebook_instances()
            .await
            .map_err(|e| ScanError::new(self.resource_type(), e))?;

        tracing::info!("Collecting data from {}...", self.display_name());

        let outputs: Vec<ScanOutput> = stream::iter(instances)
            .map(move |data| scan_notebook(ctx, sagemaker, data))
            .buffered(ctx.concurrency)
            .try_collect()
            .await
            .map_err(|e| ScanError::new(self.resource_type(), e))?;

        let output = merge(outputs);
        tracing::info!(
            "Found {} notebook instances in {} ({})",
            output.resources.len(),
            ctx.vpc_id,
            ctx.region()
        );
        Ok(output)
    }
}

async fn scan_notebook(
    ctx: &ScanContext,
    sagemaker: SageMaker<'_>,
    data: NotebookInstanceSummary,
) -> Result<ScanOutput, AwsError> {
    let mut output = ScanOutput::default();

    let instance = sagemaker
        .describe_notebook_instance(&data.notebook_instance_name)
        .await?;

    // Notebooks with direct internet access have no subnet at all
    let Some(subnet_id) = instance.subnet_id else {
        tracing::debug!("Notebook {} has no subnet", data.notebook_instance_name);
        return Ok(output);
    };

    if !subnet_in_vpc(ctx, &subnet_id).await {
        return Ok(output);
    }

    let tags = sagemaker.list_tags(&data.notebook_instance_arn).await?;
    let digest = ResourceDigest::new(data.notebook_instance_arn, SAGEMAKER_NOTEBOOK_INSTANCE);
    let edge = subnet_edge(&digest, &subnet_id);

    output.push(
        Resource::new(digest, data.notebook_instance_name)
            .with_group(GROUP_ML)
            .with_tags(resource_tags(&tags)),
        edge,
    );

    Ok(output)
}

// =============================================================================
// Training jobs
// =============================================================================

/// SageMaker training jobs running in one or more subnets of the VPC
///
/// A job spanning several matching subnets is reported once per subnet, each
/// copy paired with its own edge. [`ResourceGraph`](super::graph::ResourceGraph)
/// folds the copies back into one node.
#[derive(Debug, Default, Clone, Copy)]
pub struct SageMakerTrainingJobScanner;

#[async_trait]
impl ResourceScanner for SageMakerTrainingJobScanner {
    fn resource_type(&self) -> &'static str {
        SAGEMAKER_TRAINING_JOB
    }

    fn display_name(&self) -> &'static str {
        "Sagemaker Training Job"
    }

    async fn scan(&self, ctx: &ScanContext) -> Result<ScanOutput, ScanError> {
        let sagemaker = SageMaker::new(ctx.client());

        let jobs = sagemaker
            .list_training_jobs()
            .await
            .map_err(|e| ScanError::new(self.resource_type(), e))?;

        tracing::info!("Collecting data from {}...", self.display_name());

        let outputs: Vec<ScanOutput> = stream::iter(jobs)
            .map(move |data| scan_training_job(ctx, sagemaker, data))
            .buffered(ctx.concurrency)
            .try_collect()
            .await
            .map_err(|e| ScanError::new(self.resource_type(), e))?;

        let output = merge(outputs);
        tracing::info!(
            "Found {} training job links in {} ({})",
            output.edges.len(),
            ctx.vpc_id,
            ctx.region()
        );
        Ok(output)
    }
}

async fn scan_training_job(
    ctx: &ScanContext,
    sagemaker: SageMaker<'_>,
    data: TrainingJobSummary,
) -> Result<ScanOutput, AwsError> {
    let mut output = ScanOutput::default();

    let job = sagemaker
        .describe_training_job(&data.training_job_name)
        .await?;

    // Jobs outside any VPC are out of scope
    let Some(vpc_config) = job.vpc_config else {
        return Ok(output);
    };

    let digest = ResourceDigest::new(data.training_job_arn.as_str(), SAGEMAKER_TRAINING_JOB);
    let mut resource: Option<Resource> = None;

    for subnet_id in &vpc_config.subnets {
        if !subnet_in_vpc(ctx, subnet_id).await {
            continue;
        }

        // Tags are only fetched once the job is known to qualify
        if resource.is_none() {
            let tags = sagemaker.list_tags(&data.training_job_arn).await?;
            resource = Some(
                Resource::new(digest.clone(), data.training_job_name.as_str())
                    .with_group(GROUP_ML)
                    .with_tags(resource_tags(&tags)),
            );
        }

        if let Some(resource) = &resource {
            output.push(resource.clone(), subnet_edge(&digest, subnet_id));
        }
    }

    Ok(output)
}
