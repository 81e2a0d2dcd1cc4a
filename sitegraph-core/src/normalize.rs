// CSV crawl export -> canonical page records

use crate::columns::{ColumnMapping, parse_header};
use crate::config::SitegraphConfig;
use crate::error::{GraphError, Result};
use crate::model::{ContentAnalysis, PageRecord, SeoMetadata};
use tracing::{debug, info};
use url::Url;

const BOM: char = '\u{feff}';
const DEFAULT_INDEXABILITY: &str = "Indexable";

/// Convert a CSV export into page records.
///
/// Rows are split naively on `,`, so quoted cells containing commas are not
/// supported. Non-HTML rows and rows without a URL are dropped. A synthetic
/// root page is appended when the export does not contain the site root.
pub fn normalize_csv(content: &str, config: &SitegraphConfig) -> Result<Vec<PageRecord>> {
    let content = content.strip_prefix(BOM).unwrap_or(content).trim();
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2 {
        return Err(GraphError::EmptyOrInvalidInput);
    }

    let header = parse_header(lines[0]);
    let mapping = ColumnMapping::resolve(&header, &config.columns)?;
    debug!("Resolved CSV columns: {:?}", mapping);

    let mut pages: Vec<PageRecord> = lines[1..]
        .iter()
        .filter_map(|line| normalize_row(line, &mapping, &config.indexable_tokens))
        .collect();

    if pages.is_empty() {
        return Err(GraphError::NoValidRows);
    }

    let dropped = lines.len() - 1 - pages.len();
    if dropped > 0 {
        debug!("Dropped {} CSV rows (non-HTML or missing URL)", dropped);
    }

    if let Some(root) = synthesize_root(&pages) {
        info!("Adding synthetic root page {}", root.url);
        pages.push(root);
    }

    Ok(pages)
}

fn normalize_row(
    line: &str,
    mapping: &ColumnMapping,
    indexable_tokens: &[String],
) -> Option<PageRecord> {
    let cells: Vec<&str> = line.split(',').map(|c| c.trim().trim_matches('"')).collect();
    let cell = |idx: Option<usize>| idx.map(|i| cells.get(i).copied().unwrap_or(""));

    if let Some(content_type) = cell(mapping.content_type)
        && !content_type.contains("text/html")
    {
        return None;
    }

    let url = cell(Some(mapping.url)).unwrap_or("");
    if url.is_empty() {
        return None;
    }

    let inlinks = cell(mapping.inlinks).map(parse_leading_int).unwrap_or(0);
    let crawl_depth = cell(mapping.crawl_depth).map(parse_leading_int).unwrap_or(0);
    let title = cell(mapping.title)
        .filter(|t| !t.is_empty())
        .unwrap_or(url);
    let indexability = cell(mapping.indexability).unwrap_or(DEFAULT_INDEXABILITY);
    let is_no_index = !is_indexable(indexability, indexable_tokens);
    let crawl_depth = u32::try_from(crawl_depth).unwrap_or(u32::MAX);

    Some(PageRecord {
        url: url.to_string(),
        title: title.to_string(),
        seo: SeoMetadata {
            crawl_depth: Some(crawl_depth),
            is_no_index,
            is_orphan: crawl_depth > 0 && inlinks == 0,
            internal_link_equity: inlinks,
            content_analysis: ContentAnalysis {
                outgoing_internal_links: infer_parent_link(url).into_iter().collect(),
            },
        },
    })
}

/// True when `value` matches one of the indexable tokens, ignoring case
pub fn is_indexable(value: &str, indexable_tokens: &[String]) -> bool {
    let value = value.trim().to_lowercase();
    indexable_tokens.iter().any(|t| t.to_lowercase() == value)
}

/// Parse the leading run of digits, `0` when there is none.
/// Negative numbers clamp to `0`, oversized ones to `u64::MAX`.
pub fn parse_leading_int(value: &str) -> u64 {
    let value = value.trim();
    if value.starts_with('-') {
        return 0;
    }
    let digits: String = value
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// The URL one path segment shallower, or `None` when the page is already at
/// the top of its site or the URL cannot be parsed.
///
/// `https://ex.com/blog/post` -> `https://ex.com/blog/`,
/// `https://ex.com/blog` -> `https://ex.com/`
pub fn infer_parent_link(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return None;
    }

    let parent_segments = &segments[..segments.len() - 1];
    let trailing = if segments.len() > 1 { "/" } else { "" };
    let parent_path = format!("/{}{}", parent_segments.join("/"), trailing);
    let parent = parsed.join(&parent_path).ok()?;

    (parent.as_str() != url).then(|| parent.to_string())
}

/// `scheme://host[:port]/` of a URL, `None` for URLs without a host origin
pub fn origin_root(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Url::parse(&format!("{}/", origin.ascii_serialization())).ok()
}

/// Root page for the first record's origin, when the records lack one
pub fn synthesize_root(pages: &[PageRecord]) -> Option<PageRecord> {
    let root = origin_root(&pages.first()?.url)?;
    if pages.iter().any(|p| p.url == root.as_str()) {
        return None;
    }

    let title = root.host_str().unwrap_or(root.as_str()).to_string();
    Some(PageRecord::new(root.as_str()).with_title(title).with_depth(0))
}
