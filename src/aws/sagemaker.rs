//! SageMaker
//!
//! Typed wrappers for the handful of SageMaker operations the ML scanners use.
//! Listing operations follow `NextToken` until the last page.

use super::client::{AwsClient, Service};
use super::error::AwsError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Key/value tag as returned by `ListTags`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotebookInstanceSummary {
    pub notebook_instance_name: String,
    pub notebook_instance_arn: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotebookInstanceDescription {
    /// Absent for notebooks that are not attached to a VPC
    #[serde(default)]
    pub subnet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingJobSummary {
    pub training_job_name: String,
    pub training_job_arn: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfig {
    #[serde(default)]
    pub subnets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingJobDescription {
    /// Absent for jobs that run outside any VPC
    #[serde(default)]
    pub vpc_config: Option<VpcConfig>,
}

/// One page of a listing operation
trait Page: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListNotebookInstancesOutput {
    #[serde(default)]
    notebook_instances: Vec<NotebookInstanceSummary>,
    next_token: Option<String>,
}

impl Page for ListNotebookInstancesOutput {
    type Item = NotebookInstanceSummary;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
        (self.notebook_instances, self.next_token)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListTrainingJobsOutput {
    #[serde(default)]
    training_job_summaries: Vec<TrainingJobSummary>,
    next_token: Option<String>,
}

impl Page for ListTrainingJobsOutput {
    type Item = TrainingJobSummary;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
        (self.training_job_summaries, self.next_token)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListTagsOutput {
    #[serde(default)]
    tags: Vec<Tag>,
    next_token: Option<String>,
}

impl Page for ListTagsOutput {
    type Item = Tag;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
        (self.tags, self.next_token)
    }
}

/// SageMaker view of an [`AwsClient`]
#[derive(Clone, Copy)]
pub struct SageMaker<'a> {
    client: &'a AwsClient,
}

impl<'a> SageMaker<'a> {
    pub fn new(client: &'a AwsClient) -> Self {
        Self { client }
    }

    /// List all notebook instances (auto-paginate)
    pub async fn list_notebook_instances(&self) -> Result<Vec<NotebookInstanceSummary>, AwsError> {
        self.paginate::<ListNotebookInstancesOutput>("ListNotebookInstances", json!({}))
            .await
    }

    pub async fn describe_notebook_instance(
        &self,
        name: &str,
    ) -> Result<NotebookInstanceDescription, AwsError> {
        self.client
            .json_request(
                Service::SageMaker,
                "DescribeNotebookInstance",
                &json!({ "NotebookInstanceName": name }),
            )
            .await
    }

    /// List all training jobs (auto-paginate)
    pub async fn list_training_jobs(&self) -> Result<Vec<TrainingJobSummary>, AwsError> {
        self.paginate::<ListTrainingJobsOutput>("ListTrainingJobs", json!({}))
            .await
    }

    pub async fn describe_training_job(
        &self,
        name: &str,
    ) -> Result<TrainingJobDescription, AwsError> {
        self.client
            .json_request(
                Service::SageMaker,
                "DescribeTrainingJob",
                &json!({ "TrainingJobName": name }),
            )
            .await
    }

    /// List all tags of a resource (auto-paginate)
    pub async fn list_tags(&self, resource_arn: &str) -> Result<Vec<Tag>, AwsError> {
        self.paginate::<ListTagsOutput>("ListTags", json!({ "ResourceArn": resource_arn }))
            .await
    }

    async fn paginate<P: Page>(
        &self,
        operation: &str,
        input: Value,
    ) -> Result<Vec<P::Item>, AwsError> {
        let mut all_items = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut params = input.clone();
            if let (Value::Object(map), Some(token)) = (&mut params, &next_token) {
                map.insert("NextToken".to_string(), Value::String(token.clone()));
            }

            let page: P = self
                .client
                .json_request(Service::SageMaker, operation, &params)
                .await?;
            let (items, token) = page.into_parts();
            all_items.extend(items);

            match token.filter(|t| !t.is_empty()) {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        tracing::debug!("{} returned {} items", operation, all_items.len());
        Ok(all_items)
    }
}
