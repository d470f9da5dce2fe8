/// A branch name together with the commit sha it points at.
#[derive(Debug, Clone)]
pub struct BranchRef {
    pub name: String,
    pub sha: String,
}
