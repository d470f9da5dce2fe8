use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use crate::config::constants::{GITHUB_API_BASE, USER_AGENT};
use crate::errors::{ActionError, ActionResult};
use crate::structs::github::branch_ref::BranchRef;
use crate::structs::github::commit_info::CommitInfo;
use crate::structs::github::discussion_info::DiscussionInfo;
use crate::structs::github::issue_info::IssueInfo;
use crate::structs::github::pull_request_file::PullRequestFile;
use crate::structs::github::pull_request_info::PullRequestInfo;
use crate::structs::github::tree_entry::TreeEntry;

/// GitHub REST v3 (plus GraphQL for discussions) client.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: String) -> ActionResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ActionError::system_error("HTTP client setup", &e.to_string()))?;

        Ok(Self {
            http,
            base_api: GITHUB_API_BASE.to_string(),
            token,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }

    async fn check(
        response: reqwest::Response,
        operation: &str,
    ) -> ActionResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ActionError::github_error(
            operation,
            Some(status.as_u16()),
            &body,
        ))
    }

    pub async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> ActionResult<IssueInfo> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_api, owner, repo, issue_number
        );
        let response = Self::check(self.get(&url).send().await?, "get issue").await?;
        let raw: IssueResponse = response.json().await?;

        Ok(IssueInfo {
            number: raw.number,
            title: raw.title,
            body: raw.body,
            labels: raw
                .labels
                .into_iter()
                .filter_map(|l| match l {
                    LabelResponse::Name(name) => Some(name),
                    LabelResponse::Object { name } => name,
                })
                .collect(),
        })
    }

    /// Pull request metadata, raw diff and changed-file list. The diff
    /// comes from a second request with the diff media type; per-file
    /// patches come from the files endpoint.
    pub async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> ActionResult<PullRequestInfo> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_api, owner, repo, pr_number
        );

        let meta_response = Self::check(self.get(&url).send().await?, "get pull request").await?;
        let meta: PullResponse = meta_response.json().await?;

        let diff_response = Self::check(
            self.http
                .get(&url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github.v3.diff")
                .send()
                .await?,
            "get pull request diff",
        )
        .await?;
        let diff = diff_response.text().await?;

        let files_url = format!("{}/files", url);
        let files_response = Self::check(
            self.get(&files_url)
                .query(&[("per_page", "100")])
                .send()
                .await?,
            "list pull request files",
        )
        .await?;
        let files: Vec<PullRequestFile> = files_response.json().await?;

        Ok(PullRequestInfo {
            number: meta.number,
            title: meta.title,
            body: meta.body,
            diff,
            files,
            head: BranchRef {
                name: meta.head.branch,
                sha: meta.head.sha,
            },
            base: BranchRef {
                name: meta.base.branch,
                sha: meta.base.sha,
            },
        })
    }

    /// Fetch a file's content at a ref using the raw media type.
    pub async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> ActionResult<String> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_api, owner, repo, path
        );
        let response = Self::check(
            self.http
                .get(&url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github.v3.raw")
                .query(&[("ref", git_ref)])
                .send()
                .await?,
            "get file content",
        )
        .await?;
        Ok(response.text().await?)
    }

    /// Blob sha of a file at a ref, `None` when the file does not exist.
    pub async fn get_file_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> ActionResult<Option<String>> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_api, owner, repo, path
        );
        let response = self.get(&url).query(&[("ref", git_ref)]).send().await?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        let response = Self::check(response, "get file sha").await?;
        let raw: ContentsResponse = response.json().await?;
        Ok(Some(raw.sha))
    }

    pub async fn post_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> ActionResult<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_api, owner, repo, issue_number
        );
        Self::check(
            self.post(&url).json(&json!({ "body": body })).send().await?,
            "post comment",
        )
        .await?;
        Ok(())
    }

    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> ActionResult<u64> {
        let url = format!("{}/repos/{}/{}/issues", self.base_api, owner, repo);
        let response = Self::check(
            self.post(&url)
                .json(&json!({ "title": title, "body": body, "labels": labels }))
                .send()
                .await?,
            "create issue",
        )
        .await?;
        let raw: NumberedResponse = response.json().await?;
        Ok(raw.number)
    }

    /// Number of the most recently updated open pull request, if any.
    pub async fn latest_open_pull_request(
        &self,
        owner: &str,
        repo: &str,
    ) -> ActionResult<Option<u64>> {
        let url = format!("{}/repos/{}/{}/pulls", self.base_api, owner, repo);
        let response = Self::check(
            self.get(&url)
                .query(&[
                    ("state", "open"),
                    ("sort", "updated"),
                    ("direction", "desc"),
                    ("per_page", "1"),
                ])
                .send()
                .await?,
            "list open pull requests",
        )
        .await?;
        let prs: Vec<NumberedResponse> = response.json().await?;
        Ok(prs.first().map(|pr| pr.number))
    }

    pub async fn list_recent_commits(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> ActionResult<Vec<CommitInfo>> {
        let url = format!("{}/repos/{}/{}/commits", self.base_api, owner, repo);
        let response = Self::check(
            self.get(&url)
                .query(&[("per_page", limit.to_string().as_str())])
                .send()
                .await?,
            "list commits",
        )
        .await?;
        let raw: Vec<CommitResponse> = response.json().await?;

        Ok(raw
            .into_iter()
            .map(|c| {
                let author = c.commit.author.unwrap_or_default();
                CommitInfo {
                    sha: c.sha,
                    message: c.commit.message,
                    author: author.name,
                    date: author.date,
                }
            })
            .collect())
    }

    pub async fn get_default_branch(&self, owner: &str, repo: &str) -> ActionResult<BranchRef> {
        let url = format!("{}/repos/{}/{}", self.base_api, owner, repo);
        let response = Self::check(self.get(&url).send().await?, "get repository").await?;
        let raw: RepoResponse = response.json().await?;

        let ref_url = format!(
            "{}/repos/{}/{}/git/ref/heads/{}",
            self.base_api, owner, repo, raw.default_branch
        );
        let ref_response = Self::check(self.get(&ref_url).send().await?, "get branch ref").await?;
        let git_ref: GitRefResponse = ref_response.json().await?;

        Ok(BranchRef {
            name: raw.default_branch,
            sha: git_ref.object.sha,
        })
    }

    /// Recursive tree listing at a commit sha.
    pub async fn get_repo_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> ActionResult<Vec<TreeEntry>> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}",
            self.base_api, owner, repo, sha
        );
        let response = Self::check(
            self.get(&url).query(&[("recursive", "1")]).send().await?,
            "get repository tree",
        )
        .await?;
        let raw: TreeResponse = response.json().await?;
        Ok(raw.tree)
    }

    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch_name: &str,
        from_sha: &str,
    ) -> ActionResult<()> {
        let url = format!("{}/repos/{}/{}/git/refs", self.base_api, owner, repo);
        Self::check(
            self.post(&url)
                .json(&json!({
                    "ref": format!("refs/heads/{}", branch_name),
                    "sha": from_sha,
                }))
                .send()
                .await?,
            "create branch",
        )
        .await?;
        Ok(())
    }

    /// Create or update a file through the contents API. `existing_sha`
    /// must be supplied when replacing an existing file.
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
        existing_sha: Option<&str>,
    ) -> ActionResult<()> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_api, owner, repo, path
        );

        let mut payload = json!({
            "message": message,
            "content": BASE64.encode(content.as_bytes()),
            "branch": branch,
        });
        if let Some(sha) = existing_sha {
            payload["sha"] = json!(sha);
        }

        Self::check(
            self.http
                .put(&url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github+json")
                .json(&payload)
                .send()
                .await?,
            "create or update file",
        )
        .await?;
        Ok(())
    }

    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> ActionResult<u64> {
        let url = format!("{}/repos/{}/{}/pulls", self.base_api, owner, repo);
        let response = Self::check(
            self.post(&url)
                .json(&json!({
                    "title": title,
                    "body": body,
                    "head": head,
                    "base": base,
                }))
                .send()
                .await?,
            "create pull request",
        )
        .await?;
        let raw: NumberedResponse = response.json().await?;
        Ok(raw.number)
    }

    /// Fire a `repository_dispatch` event that workflows can listen for.
    pub async fn create_dispatch_event(
        &self,
        owner: &str,
        repo: &str,
        event_type: &str,
        client_payload: serde_json::Value,
    ) -> ActionResult<()> {
        let url = format!("{}/repos/{}/{}/dispatches", self.base_api, owner, repo);
        Self::check(
            self.post(&url)
                .json(&json!({
                    "event_type": event_type,
                    "client_payload": client_payload,
                }))
                .send()
                .await?,
            "create dispatch event",
        )
        .await?;
        Ok(())
    }

    pub async fn get_discussion(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> ActionResult<DiscussionInfo> {
        let query = r#"query($owner: String!, $repo: String!, $number: Int!) {
          repository(owner: $owner, name: $repo) {
            discussion(number: $number) {
              id
              number
              title
              body
            }
          }
        }"#;

        let data = self
            .graphql(
                query,
                json!({ "owner": owner, "repo": repo, "number": number }),
                "get discussion",
            )
            .await?;

        let discussion = data
            .pointer("/repository/discussion")
            .filter(|d| !d.is_null())
            .ok_or_else(|| {
                ActionError::github_error(
                    "get discussion",
                    None,
                    &format!("discussion #{} not found", number),
                )
            })?;

        Ok(DiscussionInfo {
            node_id: discussion
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            number: discussion
                .get("number")
                .and_then(|v| v.as_u64())
                .unwrap_or(number),
            title: discussion
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            body: discussion
                .get("body")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        })
    }

    pub async fn add_discussion_comment(
        &self,
        discussion_node_id: &str,
        body: &str,
    ) -> ActionResult<()> {
        let mutation = r#"mutation($discussionId: ID!, $body: String!) {
          addDiscussionComment(input: { discussionId: $discussionId, body: $body }) {
            comment {
              id
            }
          }
        }"#;

        self.graphql(
            mutation,
            json!({ "discussionId": discussion_node_id, "body": body }),
            "add discussion comment",
        )
        .await?;
        Ok(())
    }

    async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
        operation: &str,
    ) -> ActionResult<serde_json::Value> {
        let url = format!("{}/graphql", self.base_api);
        let response = Self::check(
            self.post(&url)
                .json(&json!({ "query": query, "variables": variables }))
                .send()
                .await?,
            operation,
        )
        .await?;

        let body: serde_json::Value = response.json().await?;
        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                return Err(ActionError::github_error(
                    operation,
                    None,
                    &errors
                        .iter()
                        .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                        .collect::<Vec<_>>()
                        .join("; "),
                ));
            }
        }

        body.get("data")
            .cloned()
            .ok_or_else(|| ActionError::github_error(operation, None, "empty GraphQL response"))
    }
}

// Raw API response shapes

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelResponse {
    Name(String),
    Object { name: Option<String> },
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    number: u64,
    title: String,
    body: Option<String>,
    head: RefResponse,
    base: RefResponse,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    #[serde(rename = "ref")]
    branch: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct NumberedResponse {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Debug, Default, Deserialize)]
struct CommitAuthor {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct GitRefResponse {
    object: GitRefObject,
}

#[derive(Debug, Deserialize)]
struct GitRefObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
}
