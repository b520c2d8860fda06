use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use hashbrown::HashMap;

use crate::{error::StoreError, post::Post};

pub type Seen = HashMap<u64, Post>;

/// Every thread ever reported, as a JSON array on disk.
///
/// One process reads it once and writes it once per pass. Two watchers
/// sharing a file will lose each other's records.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file is an empty store; the contents can
    /// always be rebuilt from the board.
    pub fn load(&self) -> Seen {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Seen::new(),
            Err(e) => {
                tracing::warn!(target: "store", "cannot read {}: {e}, starting empty", self.path.display());
                return Seen::new();
            }
        };
        match serde_json::from_str::<Vec<Post>>(&text) {
            Ok(posts) => posts.into_iter().map(|p| (p.topic_id, p)).collect(),
            Err(e) => {
                tracing::warn!(target: "store", "\x1b[33m{} is malformed ({e}), starting empty\x1b[0m", self.path.display());
                Seen::new()
            }
        }
    }

    pub fn save(&self, seen: &Seen) -> Result<(), StoreError> {
        let mut posts = seen.values().collect::<Vec<_>>();
        posts.sort_unstable_by(|a, b| b.topic_id.cmp(&a.topic_id));
        let json = serde_json::to_string_pretty(&posts)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(target: "store", "wrote {} records to {}", posts.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("store"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic_id: u64, title: &str) -> Post {
        let mut post = Post::new(
            topic_id,
            topic_id * 10,
            title.to_owned(),
            format!("https://bitcointalk.org/index.php?topic={topic_id}.0"),
        );
        post.author = "dev".into();
        post.is_mining = topic_id % 2 == 0;
        post.found_at = Some(format!("2026-10-18 12:00:{:02}", topic_id % 60));
        post
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Store::new(dir.path().join("nope.json")).load().is_empty());
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("seen.json"));
        let seen = [record(5_600_003, "C"), record(5_600_010, "A ⛏️"), record(5_600_007, "B")]
            .into_iter()
            .map(|p| (p.topic_id, p))
            .collect::<Seen>();

        store.save(&seen).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, seen);

        let on_disk: Vec<Post> = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            on_disk.iter().map(|p| p.topic_id).collect::<Vec<_>>(),
            [5_600_010, 5_600_007, 5_600_003]
        );
        assert_eq!(on_disk[0].title, "A ⛏️");
        assert_eq!(on_disk[0].found_at, seen[&5_600_010].found_at);
        assert!(!dir.path().join("seen.json.tmp").exists());
    }

    #[test]
    fn file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("seen.json"));
        let seen = [record(1, "x"), record(2, "y")]
            .into_iter()
            .map(|p| (p.topic_id, p))
            .collect::<Seen>();
        store.save(&seen).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"topic_id\": 2,"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys = value[0].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        for key in ["topic_id", "msg_id", "title", "url", "author", "is_mining", "found_at"] {
            assert!(keys.iter().any(|k| k == key), "{key}");
        }
    }

    #[test]
    fn unicode_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("seen.json"));
        let seen = Seen::from([(7, record(7, "🔥 launch"))]);
        store.save(&seen).unwrap();
        assert!(fs::read_to_string(store.path()).unwrap().contains("🔥 launch"));
    }

    #[test]
    fn malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");
        let store = Store::new(&path);

        fs::write(&path, "{ not json").unwrap();
        assert!(store.load().is_empty());

        fs::write(&path, r#"[{"title": "no ids", "url": "u"}]"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn optional_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, r#"[{"topic_id": 9, "msg_id": 90, "title": "t", "url": "u"}]"#).unwrap();
        let seen = Store::new(&path).load();
        assert_eq!(seen[&9].author, "");
        assert!(!seen[&9].is_mining);
        assert_eq!(seen[&9].found_at, None);
    }
}
