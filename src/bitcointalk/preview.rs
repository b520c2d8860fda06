use ascr::{config::Config, post::Post, util::rfc3339_now};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    scraped_at: String,
    board: &'a str,
    board_url: &'a str,
    sort: &'static str,
    count: usize,
    mining_only: bool,
    posts: &'a [Post],
}

pub fn json(config: &Config, posts: &[Post], mining_only: bool) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report {
        scraped_at: rfc3339_now(),
        board: &config.board_name,
        board_url: &config.board_url,
        sort: "newest_first",
        count: posts.len(),
        mining_only,
        posts,
    })
}

pub fn listing(posts: &[Post], mining_only: bool) -> String {
    let rule = "=".repeat(70);
    let mut out = format!(
        "\n📋 BitcoinTalk altcoin announcements — newest {} threads\n   sort: by creation time (newest first)\n",
        posts.len()
    );
    if mining_only {
        out.push_str("   filter: mining-related only\n");
    }
    out.push_str(&rule);
    out.push('\n');
    for (i, p) in posts.iter().enumerate() {
        let tag = if p.is_mining { " ⛏️" } else { "" };
        out += &format!(
            "\n[{:2}] {}{tag}\n     author: {}  |  topic id: {}\n     {}\n",
            i + 1,
            p.title,
            p.author,
            p.topic_id,
            p.url,
        );
    }
    out += &format!("\n{rule}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> Vec<Post> {
        let mut a = Post::new(5_600_002, 60_000_002, "RandomX fair launch".to_owned(), "https://bitcointalk.org/index.php?topic=5600002.0".to_owned());
        a.is_mining = true;
        a.author = "carol".into();
        let b = Post::new(5_600_001, 60_000_001, "Wallet".to_owned(), "https://bitcointalk.org/index.php?topic=5600001.0".to_owned());
        vec![a, b]
    }

    #[test]
    fn json_report() {
        let report = json(&Config::default(), &posts(), true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(v["board"], "Announcements (Altcoins)");
        assert_eq!(v["sort"], "newest_first");
        assert_eq!(v["count"], 2);
        assert_eq!(v["mining_only"], true);
        assert_eq!(v["posts"][0]["topic_id"], 5_600_002);
        assert_eq!(v["posts"][0]["is_mining"], true);
        assert!(v["posts"][0].get("found_at").is_none());
    }

    #[test]
    fn console_listing() {
        let text = listing(&posts(), false);
        assert!(text.contains("[ 1] RandomX fair launch ⛏️"));
        assert!(text.contains("[ 2] Wallet\n"));
        assert!(text.contains("author: carol  |  topic id: 5600002"));
        assert!(!text.contains("filter:"));
        assert!(text.ends_with(&format!("bitcointalk.org/index.php?topic=5600001.0\n\n{}\n", "=".repeat(70))));
        assert!(listing(&[], true).contains("filter: mining-related only"));
    }
}
