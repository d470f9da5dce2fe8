use serde::Deserialize;

/// One entry of a recursive git tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}
