use core::time::Duration;

use encoding_rs::Encoding;
use reqwest::Client as Request;

use crate::{config::Config, driver::Source, error::FetchError};

pub fn basic(user_agent: &str, timeout: Duration) -> reqwest::Result<Request> {
    Request::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

/// Single-byte decoding; bytes the encoding cannot map become U+FFFD.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!(target: "fetch", "substituted undecodable bytes ({})", encoding.name());
    }
    text.into_owned()
}

pub struct Fetcher {
    client: Request,
    url: String,
    encoding: &'static Encoding,
}

impl Fetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let Some(encoding) = Encoding::for_label(config.encoding.as_bytes()) else {
            anyhow::bail!("unknown encoding label {:?}", config.encoding);
        };
        Ok(Self {
            client: basic(&config.user_agent, config.fetch_timeout())?,
            url: config.board_url.clone(),
            encoding,
        })
    }
}

impl Source for Fetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let res = self.client.get(&self.url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = res.bytes().await?;
        tracing::info!(target: "fetch", "fetched {} bytes from {}", bytes.len(), self.url);
        Ok(decode(&bytes, self.encoding))
    }
}
