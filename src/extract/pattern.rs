use std::sync::LazyLock;

use compact_str::CompactString;
use hashbrown::HashSet;
use regex::Regex;

use super::{Extract, Filter, clean_title};
use crate::post::Post;

static SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?s)<span\s+id="msg_(\d+)">"#,
        r#"\s*<a\s+href="(https://bitcointalk\.org/index\.php\?topic=(\d+)\.\d+)">"#,
        r#"(.+?)</a>\s*</span>"#,
    ))
    .unwrap()
});

static STICKY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"id="stickyicon_(\d+)""#).unwrap());

static PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"action=profile[^"]*"[^>]*>([^<]+)</a>"#).unwrap());

/// Pattern matching over the raw listing text. Only as good as the page
/// markup is stable.
pub struct Pattern {
    filter: Filter,
}

impl Pattern {
    pub const fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

pub fn pinned(text: &str) -> HashSet<u64> {
    STICKY
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

/// The "started by" column: first profile link after the subject, within
/// the same row.
pub fn author(row: &str) -> CompactString {
    let row = row.find("</tr>").map_or(row, |end| &row[..end]);
    PROFILE
        .captures(row)
        .map(|c| CompactString::new(c[1].trim()))
        .unwrap_or_default()
}

impl Extract for Pattern {
    fn extract(&self, text: &str) -> Vec<Post> {
        let pinned = pinned(text);
        let subjects = SUBJECT.captures_iter(text).collect::<Vec<_>>();

        let posts = subjects
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let msg_id = c[1].parse().ok()?;
                let topic_id = c[3].parse().ok()?;
                let start = c.get(0)?.end();
                let end = subjects.get(i + 1).and_then(|n| n.get(0)).map_or(text.len(), |m| m.start());

                let mut post = Post::new(topic_id, msg_id, clean_title(&c[4]), c[2].to_owned());
                post.author = author(&text[start..end]);
                Some(post)
            })
            .collect();

        self.filter.apply(posts, &pinned)
    }
}
