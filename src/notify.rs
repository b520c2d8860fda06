use reqwest::{Client as Request, StatusCode};
use serde::Serialize;

use crate::{config::Config, driver::Sink, error::NotifyError, post::Post};

#[derive(Serialize)]
struct Payload<'a> {
    content: &'a str,
}

/// Discord message body for one newly seen thread.
pub fn format_message(post: &Post) -> String {
    let tag = if post.is_mining { " ⛏️" } else { "" };
    let author = if post.author.is_empty() { "N/A" } else { post.author.as_str() };
    let found_at = post.found_at.as_deref().unwrap_or("N/A");
    // angle brackets keep Discord from embedding a preview
    format!(
        "\n\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n🆕 **New Post**{tag}\n\n> 📌 **{}**\n> \n> 👤 Author: **{author}**\n> 🕐 Time: {found_at}\n> 🔗 <{}>\n\n",
        post.title, post.url,
    )
}

pub struct Discord {
    client: Request,
    url: Option<String>,
}

impl Discord {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            client: crate::scrape::basic(&config.user_agent, config.notify_timeout())?,
            url: config.webhook_url.clone(),
        })
    }
}

impl Sink for Discord {
    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        let Some(url) = &self.url else {
            return Err(NotifyError::NotConfigured);
        };
        let content = format_message(post);
        let res = self
            .client
            .post(url)
            .json(&Payload { content: &content })
            .send()
            .await?;
        match res.status() {
            StatusCode::NO_CONTENT => {
                tracing::info!(target: "notify", "\x1b[36msent\x1b[0m {}", post.title);
                Ok(())
            }
            status => Err(NotifyError::Status(status)),
        }
    }

    fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}
