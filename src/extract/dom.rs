use std::sync::LazyLock;

use compact_str::CompactString;
use hashbrown::HashSet;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{Extract, Filter, strip_tags};
use crate::post::Post;

static THREAD_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://bitcointalk\.org/index\.php\?topic=(\d+)\.\d+$").unwrap());

/// Structural parse of the listing: same records as [`super::pattern::Pattern`],
/// but tolerant of attribute order and whitespace changes.
pub struct Dom {
    filter: Filter,
    sel_subject: Selector,
    sel_link: Selector,
    sel_sticky: Selector,
    sel_profile: Selector,
}

impl Dom {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            sel_subject: Selector::parse(r#"span[id^="msg_"]"#).unwrap(),
            sel_link: Selector::parse("a[href]").unwrap(),
            sel_sticky: Selector::parse(r#"img[id^="stickyicon_"]"#).unwrap(),
            sel_profile: Selector::parse(r#"a[href*="action=profile"]"#).unwrap(),
        }
    }

    fn author(&self, subject: ElementRef) -> CompactString {
        let row = subject
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "tr");
        row.and_then(|tr| tr.select(&self.sel_profile).next())
            .map(|a| CompactString::new(a.text().collect::<String>().trim()))
            .unwrap_or_default()
    }

    fn post(&self, subject: ElementRef) -> Option<Post> {
        let msg_id = subject.attr("id")?.strip_prefix("msg_")?.parse().ok()?;
        let link = subject.select(&self.sel_link).next()?;
        let url = link.attr("href")?;
        let topic_id = THREAD_HREF.captures(url)?[1].parse().ok()?;
        let title = strip_tags(link.text().collect::<String>().trim()).trim().to_owned();

        let mut post = Post::new(topic_id, msg_id, title, url.to_owned());
        post.author = self.author(subject);
        Some(post)
    }
}

impl Extract for Dom {
    fn extract(&self, text: &str) -> Vec<Post> {
        let html = Html::parse_document(text);

        let pinned = html
            .select(&self.sel_sticky)
            .filter_map(|img| img.attr("id")?.strip_prefix("stickyicon_")?.parse().ok())
            .collect::<HashSet<u64>>();

        let posts = html
            .select(&self.sel_subject)
            .filter_map(|subject| self.post(subject))
            .collect();

        self.filter.apply(posts, &pinned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::fixture::{board, page, row, sticky_row};

    const FILTER: Filter = Filter {
        admin_msg_floor: 20_000_000,
        topic_floor: 5_500_000,
    };

    #[test]
    fn board_fixture() {
        let posts = Dom::new(FILTER).extract(&board());
        let ids = posts.iter().map(|p| p.topic_id).collect::<Vec<_>>();
        assert_eq!(ids, [5_560_030, 5_560_020, 5_560_010]);
        assert_eq!(posts[2].author, "alice");
        assert_eq!(posts[1].title, "🔥 RandomX fair launch");
    }

    #[test]
    fn tolerates_attribute_reordering() {
        let text = page(&[row(70_000_001, 5_700_001, "Quoted", "dev").replace(
            r#"<a href="https://bitcointalk.org/index.php?topic=5700001.0">"#,
            r#"<a class="subject" href="https://bitcointalk.org/index.php?topic=5700001.0" >"#,
        )]);
        let posts = Dom::new(FILTER).extract(&text);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Quoted");
        assert_eq!(posts[0].author, "dev");
    }

    #[test]
    fn pinned_never_returned() {
        let text = page(&[
            sticky_row(70_000_000, 5_700_000, "Sticky", "mod"),
            row(70_000_001, 5_700_001, "Normal", "dev"),
        ]);
        let posts = Dom::new(FILTER).extract(&text);
        assert_eq!(posts.iter().map(|p| p.topic_id).collect::<Vec<_>>(), [5_700_001]);
    }
}
