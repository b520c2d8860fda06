//! Listing page -> post records.
//!
//! Callers only see [`Extract`]; the page structure knowledge lives in the
//! implementations ([`pattern::Pattern`] and [`dom::Dom`]), which share the
//! same filtering policy and ordering through [`Filter`].

pub mod dom;
pub mod pattern;

use std::{borrow::Cow, sync::LazyLock};

use hashbrown::HashSet;
use regex::{Captures, Regex};

use crate::{
    config::{Config, ExtractorKind},
    post::{Post, sort_newest_first},
};

pub trait Extract {
    /// Candidate posts, newest thread first, with pinned and administrative
    /// threads already removed. `is_mining` and `found_at` are left unset.
    fn extract(&self, text: &str) -> Vec<Post>;
}

pub fn from_config(config: &Config) -> Box<dyn Extract> {
    let filter = Filter::from(config);
    match config.extractor {
        ExtractorKind::Regex => Box::new(pattern::Pattern::new(filter)),
        ExtractorKind::Dom => Box::new(dom::Dom::new(filter)),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Filter {
    pub admin_msg_floor: u64,
    pub topic_floor: u64,
}

impl From<&Config> for Filter {
    fn from(config: &Config) -> Self {
        Self {
            admin_msg_floor: config.admin_msg_floor,
            topic_floor: config.topic_floor,
        }
    }
}

impl Filter {
    pub fn keep(&self, post: &Post, pinned: &HashSet<u64>) -> bool {
        !pinned.contains(&post.topic_id)
            && post.msg_id >= self.admin_msg_floor
            && post.topic_id >= self.topic_floor
    }

    pub fn apply(&self, mut posts: Vec<Post>, pinned: &HashSet<u64>) -> Vec<Post> {
        let total = posts.len();
        posts.retain(|post| self.keep(post, pinned));
        sort_newest_first(&mut posts);
        tracing::info!(target: "extract", "parsed {} posts ({} pinned/administrative dropped)", posts.len(), total - posts.len());
        posts
    }
}

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

fn named(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "bull" => '•',
        "euro" => '€',
        "pound" => '£',
        "yen" => '¥',
        "cent" => '¢',
        "deg" => '°',
        "times" => '×',
        _ => return None,
    })
}

fn reference(body: &str) -> Option<char> {
    let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse().ok()?
    } else {
        return named(body);
    };
    char::from_u32(code)
}

/// Decodes named and numeric character references in one pass, so `&amp;lt;`
/// becomes `&lt;` rather than `<`. Unknown references are left untouched.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    REFERENCE.replace_all(s, |c: &Captures| match reference(&c[1]) {
        Some(ch) => ch.to_string(),
        None => c[0].to_owned(),
    })
}

pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG.replace_all(s, "")
}

/// Raw title fragment -> display title.
pub fn clean_title(raw: &str) -> String {
    let decoded = decode_entities(raw.trim());
    strip_tags(&decoded).trim().to_owned()
}
