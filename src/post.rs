use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One thread on the board, as extracted from the listing page.
///
/// `topic_id` is the natural key: the store never holds two records with the
/// same thread id, and every listing is ordered by it, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub topic_id: u64,
    pub msg_id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: CompactString,
    #[serde(default)]
    pub is_mining: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_at: Option<String>,
}

impl Post {
    pub fn new(topic_id: u64, msg_id: u64, title: String, url: String) -> Self {
        Self {
            topic_id,
            msg_id,
            title,
            url,
            author: CompactString::default(),
            is_mining: false,
            found_at: None,
        }
    }
}

/// Sorts newest-created first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_unstable_by(|a, b| b.topic_id.cmp(&a.topic_id));
}
