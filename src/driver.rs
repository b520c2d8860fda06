use core::time::Duration;

use chrono::FixedOffset;

use crate::{
    classify::is_mining,
    config::Config,
    error::{FetchError, NotifyError},
    extract::{self, Extract},
    post::Post,
    store::Store,
    util,
};

/// Where listing pages come from.
#[allow(async_fn_in_trait)]
pub trait Source {
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// Where new threads are announced.
#[allow(async_fn_in_trait)]
pub trait Sink {
    async fn notify(&self, post: &Post) -> Result<(), NotifyError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

pub struct Driver<S, N> {
    source: S,
    sink: N,
    extractor: Box<dyn Extract>,
    store: Store,
    offset: FixedOffset,
    notify_delay: Duration,
    interval: Duration,
}

impl<S: Source, N: Sink> Driver<S, N> {
    pub fn new(config: &Config, source: S, sink: N) -> Self {
        Self {
            source,
            sink,
            extractor: extract::from_config(config),
            store: Store::new(&config.store),
            offset: config.offset(),
            notify_delay: config.notify_delay(),
            interval: config.interval(),
        }
    }

    /// `None` when the listing could not be fetched; the store is left alone.
    async fn pass(&self) -> anyhow::Result<Option<usize>> {
        tracing::info!(target: "driver", "start fetching ...");
        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(target: "driver", "\x1b[31mfetch failed: {e}\x1b[0m");
                return Ok(None);
            }
        };

        if !self.sink.is_enabled() {
            tracing::warn!(target: "notify", "no webhook configured (DISCORD_WEBHOOK_URL), new threads are only recorded");
        }

        let posts = self.extractor.extract(&text);
        let mut seen = self.store.load();
        let mut fresh = 0;

        for mut post in posts {
            let topic_id = post.topic_id;
            if seen.contains_key(&topic_id) {
                continue;
            }
            post.is_mining = is_mining(&post.title);
            post.found_at = Some(util::found_at(self.offset));
            let post = seen.entry(topic_id).or_insert(post);
            fresh += 1;

            tracing::info!(target: "driver", "\x1b[32mnew\x1b[0m {} (topic={topic_id})", post.title);
            if self.sink.is_enabled() {
                if let Err(e) = self.sink.notify(post).await {
                    tracing::error!(target: "notify", "\x1b[31m{e}\x1b[0m at topic {topic_id}");
                }
                tokio::time::sleep(self.notify_delay).await;
            }
        }

        self.store.save(&seen)?;
        tracing::info!(target: "driver", "\x1b[36mpass finished: {fresh} new, {} recorded\x1b[0m", seen.len());
        Ok(Some(fresh))
    }

    /// One fetch, dedup and notify pass. Returns the number of new threads.
    pub async fn run_once(&self) -> anyhow::Result<usize> {
        Ok(self.pass().await?.unwrap_or(0))
    }

    /// Runs a pass every interval, forever. A failed pass never stops the loop.
    pub async fn run_loop(&self) {
        tracing::info!(target: "driver", "loop mode, one pass every {}s (Ctrl+C to stop)", self.interval.as_secs());
        let mut failures = 0u32;
        loop {
            let outcome = self.pass().await;
            if let Err(e) = &outcome {
                tracing::error!(target: "driver", "\x1b[31mpass failed: {e:#}\x1b[0m");
            }
            failures = streak(failures, &outcome);
            if failures > 1 {
                tracing::warn!(target: "driver", "{failures} consecutive failed passes");
            }
            tracing::info!(target: "driver", "next pass in {}s ...", self.interval.as_secs());
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Newest threads on the board, classified. Reads nothing from and writes
    /// nothing to the store, and announces nothing.
    pub async fn preview(&self, mining_only: bool, count: usize) -> anyhow::Result<Vec<Post>> {
        let text = self.source.fetch().await?;
        let mut posts = self.extractor.extract(&text);
        for post in &mut posts {
            post.is_mining = is_mining(&post.title);
        }
        if mining_only {
            posts.retain(|p| p.is_mining);
        }
        posts.truncate(count);
        Ok(posts)
    }
}

/// Consecutive failed passes after `outcome`. Only a pass that fetched and
/// saved resets the count.
const fn streak(failures: u32, outcome: &anyhow::Result<Option<usize>>) -> u32 {
    match outcome {
        Ok(Some(_)) => 0,
        Ok(None) | Err(_) => failures.saturating_add(1),
    }
}
