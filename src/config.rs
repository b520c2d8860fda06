use core::time::Duration;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};

pub mod constants {
    pub const BOARD_URL: &str = "https://bitcointalk.org/index.php?board=159.0;sort=first_post;desc";
    pub const BOARD_NAME: &str = "Announcements (Altcoins)";
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const ENCODING: &str = "iso-8859-1";
    pub const STORE: &str = "btt_seen.json";

    pub const FETCH_TIMEOUT_SECS: u64 = 30;
    pub const NOTIFY_TIMEOUT_SECS: u64 = 10;
    pub const NOTIFY_DELAY_MS: u64 = 1000;
    pub const INTERVAL_SECS: u64 = 10 * 60;

    /// Board rules and other administrative threads were opened long before
    /// this message id; anything below it is never a fresh announcement.
    pub const ADMIN_MSG_FLOOR: u64 = 20_000_000;
    /// Threads below this id predate the window this watcher cares about.
    pub const TOPIC_FLOOR: u64 = 5_500_000;

    pub const UTC_OFFSET_HOURS: i32 = 8;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractorKind {
    /// Pattern matching over the raw page text.
    #[default]
    Regex,
    /// Structural parse of the page with CSS selectors.
    Dom,
}

/// Everything the watcher needs, built once at startup.
#[derive(Clone, Debug, clap::Args)]
pub struct Config {
    /// Listing page to watch
    #[arg(long, env = "BTT_BOARD_URL", default_value = constants::BOARD_URL)]
    pub board_url: String,

    /// Board name reported in JSON output
    #[arg(long, default_value = constants::BOARD_NAME)]
    pub board_name: String,

    #[arg(long, default_value = constants::USER_AGENT)]
    pub user_agent: String,

    /// Encoding label of the listing page
    #[arg(long, default_value = constants::ENCODING)]
    pub encoding: String,

    #[arg(long, value_name = "SECS", default_value_t = constants::FETCH_TIMEOUT_SECS)]
    pub fetch_timeout: u64,

    /// Discord webhook receiving one message per new thread
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    #[arg(long, value_name = "SECS", default_value_t = constants::NOTIFY_TIMEOUT_SECS)]
    pub notify_timeout: u64,

    /// Pause after each webhook message
    #[arg(long, value_name = "MS", default_value_t = constants::NOTIFY_DELAY_MS)]
    pub notify_delay: u64,

    /// File recording every thread already seen
    #[arg(long, env = "BTT_STORE", default_value = constants::STORE)]
    pub store: PathBuf,

    /// Pause between passes in loop mode
    #[arg(long, value_name = "SECS", default_value_t = constants::INTERVAL_SECS)]
    pub interval: u64,

    /// Threads whose first message id is below this are treated as administrative
    #[arg(long, default_value_t = constants::ADMIN_MSG_FLOOR)]
    pub admin_msg_floor: u64,

    /// Threads whose id is below this are treated as too old
    #[arg(long, default_value_t = constants::TOPIC_FLOOR)]
    pub topic_floor: u64,

    /// UTC offset, in hours, of the discovery timestamps
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true, default_value_t = constants::UTC_OFFSET_HOURS, value_parser = clap::value_parser!(i32).range(-23..=23))]
    pub utc_offset: i32,

    #[arg(long, value_enum, default_value_t)]
    pub extractor: ExtractorKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_url: constants::BOARD_URL.to_owned(),
            board_name: constants::BOARD_NAME.to_owned(),
            user_agent: constants::USER_AGENT.to_owned(),
            encoding: constants::ENCODING.to_owned(),
            fetch_timeout: constants::FETCH_TIMEOUT_SECS,
            webhook_url: None,
            notify_timeout: constants::NOTIFY_TIMEOUT_SECS,
            notify_delay: constants::NOTIFY_DELAY_MS,
            store: PathBuf::from(constants::STORE),
            interval: constants::INTERVAL_SECS,
            admin_msg_floor: constants::ADMIN_MSG_FLOOR,
            topic_floor: constants::TOPIC_FLOOR,
            utc_offset: constants::UTC_OFFSET_HOURS,
            extractor: ExtractorKind::default(),
        }
    }
}

impl Config {
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub const fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout)
    }

    pub const fn notify_delay(&self) -> Duration {
        Duration::from_millis(self.notify_delay)
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// Falls back to UTC if the offset is out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset * 3600).unwrap_or_else(|| Utc.fix())
    }
}
