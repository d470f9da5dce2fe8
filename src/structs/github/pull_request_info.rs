use crate::structs::github::branch_ref::BranchRef;
use crate::structs::github::pull_request_file::PullRequestFile;

/// Pull request metadata plus the raw unified diff and per-file patches.
#[derive(Debug, Clone)]
pub struct PullRequestInfo {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub diff: String,
    pub files: Vec<PullRequestFile>,
    pub head: BranchRef,
    pub base: BranchRef,
}
