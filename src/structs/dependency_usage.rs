/// Usage sites sampled from the repository for one changed dependency.
/// Each snippet is a file path header followed by the matching lines.
#[derive(Debug, Clone)]
pub struct DependencyUsage {
    pub name: String,
    pub snippets: Vec<String>,
}
