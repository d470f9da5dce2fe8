#[derive(Debug, Clone)]
pub struct RepoContext {
    pub owner: String,
    pub repo: String,
}
