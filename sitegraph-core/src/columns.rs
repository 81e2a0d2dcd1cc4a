// Resolves CSV header names to canonical page fields

use crate::config::ColumnAliases;
use crate::error::{GraphError, Result};

/// Column index per canonical field. Only `url` is guaranteed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub url: usize,
    pub title: Option<usize>,
    pub content_type: Option<usize>,
    pub inlinks: Option<usize>,
    pub crawl_depth: Option<usize>,
    pub indexability: Option<usize>,
}

/// First header index matching any alias, tried in alias order.
/// Matching is exact but case-insensitive.
pub fn find_column_index<S: AsRef<str>>(header: &[String], aliases: &[S]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        let alias = alias.as_ref().to_lowercase();
        header.iter().position(|h| h.to_lowercase() == alias)
    })
}

/// Split a raw header line into trimmed, quote-stripped names
pub fn parse_header(line: &str) -> Vec<String> {
    line.split(',')
        .map(|h| h.trim().trim_matches('"').trim().to_string())
        .collect()
}

impl ColumnMapping {
    pub fn resolve(header: &[String], aliases: &ColumnAliases) -> Result<Self> {
        let url = find_column_index(header, &aliases.url).ok_or(GraphError::MissingRequiredColumn)?;

        Ok(Self {
            url,
            title: find_column_index(header, &aliases.title),
            content_type: find_column_index(header, &aliases.content_type),
            inlinks: find_column_index(header, &aliases.inlinks),
            crawl_depth: find_column_index(header, &aliases.crawl_depth),
            indexability: find_column_index(header, &aliases.indexability),
        })
    }
}
