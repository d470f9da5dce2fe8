/// A GitHub discussion fetched over GraphQL. `node_id` is the opaque id
/// needed to attach comments.
#[derive(Debug, Clone)]
pub struct DiscussionInfo {
    pub node_id: String,
    pub number: u64,
    pub title: String,
    pub body: String,
}
