use chrono::{FixedOffset, SecondsFormat, Utc};

/// Discovery stamp written into `found_at`, e.g. `2026-10-18 21:04:55`.
pub fn found_at(offset: FixedOffset) -> String {
    Utc::now()
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn rfc3339_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
