// Derived page signals and display colors
//
// Every function here is pure and total over a valid dataset: each page gets
// exactly one color under every mode.

use crate::model::{GraphDataset, PageRecord, SeoMetadata};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

pub const COLOR_NEUTRAL: &str = "#cccccc";

pub const COLOR_DEPTH_ROOT: &str = "#28a745";
pub const COLOR_DEPTH_NEAR: &str = "#0dcaf0";
pub const COLOR_DEPTH_MID: &str = "#ffc107";
pub const COLOR_DEPTH_FAR: &str = "#dc3545";

pub const COLOR_EQUITY_NORMAL: &str = "#5bc0de";
pub const COLOR_EQUITY_ORPHAN: &str = "#f0ad4e";
pub const COLOR_EQUITY_NO_INDEX: &str = "#d9534f";

/// Sentinel segment for pages at the site root
pub const HOMEPAGE_SEGMENT: &str = "homepage";

/// Ordered URL pattern -> color rule for topic clustering.
///
/// `pattern` uses the `regex` crate syntax, matched case-insensitively.
/// Lookaround and backreferences are not supported; such rules fail to
/// compile and are skipped. Blank patterns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRule {
    pub pattern: String,
    pub color: String,
}

impl ClusterRule {
    pub fn new(pattern: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            color: color.into(),
        }
    }
}

/// Outcome of compiling one rule
#[derive(Debug, Clone)]
pub enum CompiledRule {
    Ok { regex: Regex, color: String },
    /// Pattern failed to compile; the rule takes no part in matching
    Skip { pattern: String, reason: String },
}

impl CompiledRule {
    pub fn compile(rule: &ClusterRule) -> Self {
        match RegexBuilder::new(&rule.pattern).case_insensitive(true).build() {
            Ok(regex) => CompiledRule::Ok {
                regex,
                color: rule.color.clone(),
            },
            Err(e) => {
                debug!("Skipping invalid cluster rule '{}': {}", rule.pattern, e);
                CompiledRule::Skip {
                    pattern: rule.pattern.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Rules compiled once, ready to classify many pages
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile `rules` in order, dropping rules with a blank pattern
    pub fn compile(rules: &[ClusterRule]) -> Self {
        Self {
            rules: rules
                .iter()
                .filter(|rule| !rule.pattern.trim().is_empty())
                .map(CompiledRule::compile)
                .collect(),
        }
    }

    /// Every compilation outcome, invalid rules included, in rule order
    pub fn outcomes(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Color of the first valid rule matching `url`
    pub fn match_color(&self, url: &str) -> Option<&str> {
        self.rules.iter().find_map(|rule| match rule {
            CompiledRule::Ok { regex, color } if regex.is_match(url) => Some(color.as_str()),
            _ => None,
        })
    }
}

/// Orphan: below the root with no recorded inbound internal links
pub fn is_orphan(seo: &SeoMetadata) -> bool {
    seo.crawl_depth.is_some_and(|d| d > 0) && seo.internal_link_equity == 0
}

/// Color for a crawl depth relative to the deepest page in the dataset.
///
/// `max_depth` is `None` when no page in the dataset has a known depth.
pub fn depth_color(depth: Option<u32>, max_depth: Option<u32>) -> &'static str {
    let (Some(depth), Some(max_depth)) = (depth, max_depth) else {
        return COLOR_NEUTRAL;
    };
    if depth == 0 {
        return COLOR_DEPTH_ROOT;
    }
    if max_depth <= 1 {
        return COLOR_DEPTH_NEAR;
    }

    let ratio = f64::from(depth) / f64::from(max_depth);
    if ratio <= 0.33 {
        COLOR_DEPTH_NEAR
    } else if ratio <= 0.66 {
        COLOR_DEPTH_MID
    } else {
        COLOR_DEPTH_FAR
    }
}

/// Depth color of a page within its dataset
pub fn page_depth_color(page: &PageRecord, dataset: &GraphDataset) -> &'static str {
    depth_color(page.seo.crawl_depth, dataset.max_depth())
}

/// Deterministic `#rrggbb` color for any string; empty strings are neutral.
///
/// Uses the 32-bit `h = c + ((h << 5) - h)` hash over UTF-16 code units and
/// takes its three low bytes as red, green and blue.
pub fn string_to_color(s: &str) -> String {
    if s.is_empty() {
        return COLOR_NEUTRAL.to_string();
    }

    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });

    let mut color = String::from("#");
    for i in 0..3 {
        let value = (hash >> (i * 8)) & 0xff;
        color.push_str(&format!("{:02x}", value));
    }
    color
}

/// First non-empty path segment of a URL, or the homepage sentinel
pub fn first_path_segment(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .map(str::to_string),
        // Unparseable: take whatever follows `scheme://host/`
        Err(_) => url
            .split('/')
            .nth(3)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };
    segment.unwrap_or_else(|| HOMEPAGE_SEGMENT.to_string())
}

/// Topic color: first matching rule, else a hash of the first path segment
pub fn topic_color(url: &str, rules: &RuleSet) -> String {
    match rules.match_color(url) {
        Some(color) => color.to_string(),
        None => string_to_color(&first_path_segment(url)),
    }
}

/// Link-equity state, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityStatus {
    NoIndex,
    Orphan,
    Normal,
}

impl EquityStatus {
    pub fn of(page: &PageRecord) -> Self {
        if page.seo.is_no_index {
            EquityStatus::NoIndex
        } else if is_orphan(&page.seo) {
            EquityStatus::Orphan
        } else {
            EquityStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EquityStatus::NoIndex => "NoIndex",
            EquityStatus::Orphan => "Orphan",
            EquityStatus::Normal => "Normal",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EquityStatus::NoIndex => COLOR_EQUITY_NO_INDEX,
            EquityStatus::Orphan => COLOR_EQUITY_ORPHAN,
            EquityStatus::Normal => COLOR_EQUITY_NORMAL,
        }
    }
}

/// NoIndex overrides Orphan overrides normal
pub fn link_equity_color(page: &PageRecord) -> &'static str {
    EquityStatus::of(page).color()
}
