//! GitHub API host implementation

use crate::error::{Error, Result};
use crate::platform::PullRequestHost;
use crate::types::{MergeMethod, NewPullRequest, PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

// GraphQL response types for the enable-automerge mutation

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnableAutoMergeData {
    enable_pull_request_auto_merge: Option<EnableAutoMergePayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnableAutoMergePayload {
    pull_request: GraphQlPullRequest,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlPullRequest {
    number: u64,
    auto_merge_request: Option<AutoMergeRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AutoMergeRequest {
    merge_method: String,
}

const ENABLE_AUTO_MERGE: &str = r"
    mutation EnablePullRequestAutoMerge($pullRequestId: ID!, $mergeMethod: PullRequestMergeMethod!) {
        enablePullRequestAutoMerge(input: { pullRequestId: $pullRequestId, mergeMethod: $mergeMethod }) {
            pullRequest {
                number
                autoMergeRequest {
                    mergeMethod
                }
            }
        }
    }
";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a service for github.com or the Enterprise host in `config`
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let base_uri = config
            .host
            .as_ref()
            .map(|h| format!("https://{h}/api/v3"));
        Self::build(token, config, base_uri.as_deref())
    }

    /// Create a service against an explicit API root
    pub fn with_base_uri(token: &str, config: PlatformConfig, base_uri: &str) -> Result<Self> {
        Self::build(token, config, Some(base_uri))
    }

    fn build(token: &str, config: PlatformConfig, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }
        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn node_id(&self, pr: &PullRequest) -> Result<String> {
        if let Some(id) = &pr.node_id {
            return Ok(id.clone());
        }
        let fetched = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr.number)
            .await?;
        fetched
            .node_id
            .ok_or_else(|| Error::GitHubApi("PR missing node_id for GraphQL mutation".to_string()))
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        head_ref: pr.head.ref_field.clone(),
        node_id: pr.node_id.clone(),
    }
}

#[async_trait]
impl PullRequestHost for GitHubService {
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        debug!(head_branch, "finding existing PR");
        let head = format!("{}:{}", &self.config.owner, head_branch);

        let prs = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .head(head)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        let result = prs.items.first().map(pr_from_octocrab);
        if let Some(ref pr) = result {
            debug!(pr_number = pr.number, "found existing PR");
        } else {
            debug!("no existing PR found");
        }
        Ok(result)
    }

    async fn create_pr(&self, request: &NewPullRequest) -> Result<PullRequest> {
        debug!(head = %request.head, base = %request.base, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(&request.title, &request.head, &request.base)
            .body(&request.body)
            .send()
            .await?;
        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");

        if !request.labels.is_empty() {
            self.add_labels(&result, &request.labels).await?;
        }
        Ok(result)
    }

    async fn add_labels(&self, pr: &PullRequest, labels: &[String]) -> Result<()> {
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(pr.number, labels)
            .await?;
        debug!(pr_number = pr.number, ?labels, "labeled PR");
        Ok(())
    }

    async fn enable_automerge(&self, pr: &PullRequest, method: MergeMethod) -> Result<()> {
        debug!(pr_number = pr.number, %method, "enabling automerge");
        let node_id = self.node_id(pr).await?;

        let response: GraphQlResponse<EnableAutoMergeData> = self
            .client
            .graphql(&serde_json::json!({
                "query": ENABLE_AUTO_MERGE,
                "variables": {
                    "pullRequestId": node_id,
                    "mergeMethod": method.graphql_name(),
                }
            }))
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL mutation failed: {e}")))?;

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        let payload = response
            .data
            .and_then(|d| d.enable_pull_request_auto_merge)
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))?;

        let Some(request) = payload.pull_request.auto_merge_request else {
            return Err(Error::GitHubApi(format!(
                "automerge not active on PR #{}",
                payload.pull_request.number
            )));
        };

        debug!(
            pr_number = payload.pull_request.number,
            merge_method = %request.merge_method,
            "automerge enabled"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "api"
    }
}
