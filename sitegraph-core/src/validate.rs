// Entry gate for page records, shared by the CSV and JSON paths

use crate::classify::is_orphan;
use crate::error::{GraphError, Result};
use crate::model::{ContentAnalysis, PageRecord, SeoMetadata};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Filter a parsed JSON value down to valid page records.
///
/// The value must be a non-empty array. Entries without a non-empty string
/// `url` are skipped; fields of kept entries are read leniently and fall back
/// to their defaults when missing or of the wrong type, and `isOrphan` is
/// recomputed from depth and link equity. When a `url` appears
/// more than once the last entry wins, at the position of the first.
pub fn validate_pages(data: &Value) -> Result<Vec<PageRecord>> {
    let items = match data.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(GraphError::InvalidOrEmptyInput),
    };

    let candidates: Vec<PageRecord> = items.iter().filter_map(page_from_value).collect();
    let skipped = items.len() - candidates.len();
    if skipped > 0 {
        debug!("Skipped {} entries without a url", skipped);
    }

    let pages = dedupe_last_wins(candidates);
    if pages.is_empty() {
        return Err(GraphError::NoValidPages);
    }

    Ok(pages)
}

/// Collapse duplicate URLs: later records replace earlier ones in place
pub fn dedupe_last_wins(pages: Vec<PageRecord>) -> Vec<PageRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<PageRecord> = Vec::with_capacity(pages.len());

    for page in pages {
        match positions.get(&page.url) {
            Some(&idx) => {
                debug!("Duplicate page {} replaces earlier record", page.url);
                unique[idx] = page;
            }
            None => {
                positions.insert(page.url.clone(), unique.len());
                unique.push(page);
            }
        }
    }

    unique
}

/// Read one page leniently, `None` when it has no usable `url`
pub fn page_from_value(value: &Value) -> Option<PageRecord> {
    let url = value.get("url")?.as_str()?;
    if url.is_empty() {
        return None;
    }

    let title = value
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(url);

    let seo = value.get("seo");
    let field = |name: &str| seo.and_then(|s| s.get(name));

    let crawl_depth = field("crawlDepth")
        .and_then(Value::as_u64)
        .and_then(|d| u32::try_from(d).ok());
    let internal_link_equity = field("internalLinkEquity")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let is_no_index = field("isNoIndex").and_then(Value::as_bool).unwrap_or(false);
    let outgoing_internal_links = field("contentAnalysis")
        .and_then(|c| c.get("outgoingInternalLinks"))
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut seo = SeoMetadata {
        crawl_depth,
        is_no_index,
        is_orphan: false,
        internal_link_equity,
        content_analysis: ContentAnalysis {
            outgoing_internal_links,
        },
    };
    // isOrphan is always re-derived, whatever the input claimed
    seo.is_orphan = is_orphan(&seo);

    Some(PageRecord {
        url: url.to_string(),
        title: title.to_string(),
        seo,
    })
}
