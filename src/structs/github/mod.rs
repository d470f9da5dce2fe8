pub mod repo_context;
pub mod issue_info;
pub mod pull_request_info;
pub mod pull_request_file;
pub mod branch_ref;
pub mod commit_info;
pub mod tree_entry;
pub mod discussion_info;
