// Folds per-page outgoing links into a deduplicated, weighted edge set

use crate::model::{Edge, PageRecord};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Edge length used by `assemble_edges`
pub const DEFAULT_EDGE_LENGTH_BASE: f64 = 350.0;

struct EdgeAccumulator {
    from: String,
    to: String,
    count: u32,
}

/// Build one edge per unordered page pair.
///
/// Self-links and links to pages outside `pages` are dropped. Links in both
/// directions between the same two pages fold into a single edge whose
/// direction is the first one observed. Edges come out in first-seen order.
pub fn assemble_edges(pages: &[PageRecord]) -> Vec<Edge> {
    assemble_edges_with(pages, DEFAULT_EDGE_LENGTH_BASE)
}

pub fn assemble_edges_with(pages: &[PageRecord], length_base: f64) -> Vec<Edge> {
    let page_urls: HashSet<&str> = pages.iter().map(|p| p.url.as_str()).collect();

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut accumulators: Vec<EdgeAccumulator> = Vec::new();
    let mut dropped = 0usize;

    for source in pages {
        for target in source.outgoing_links() {
            if target == &source.url || !page_urls.contains(target.as_str()) {
                dropped += 1;
                continue;
            }

            let key = Edge::canonical_key(&source.url, target);
            let idx = *index.entry(key).or_insert_with(|| {
                accumulators.push(EdgeAccumulator {
                    from: source.url.clone(),
                    to: target.clone(),
                    count: 0,
                });
                accumulators.len() - 1
            });
            accumulators[idx].count += 1;
        }
    }

    if dropped > 0 {
        debug!("Dropped {} self or dangling links", dropped);
    }

    accumulators
        .into_iter()
        .map(|acc| build_edge(acc.from, acc.to, acc.count, length_base))
        .collect()
}

fn build_edge(from: String, to: String, count: u32, length_base: f64) -> Edge {
    Edge {
        from,
        to,
        count,
        weight: count,
        length: length_base / f64::from(count),
        label: edge_label(count),
        is_reciprocal: count > 1,
    }
}

/// Human-readable multiplicity of an edge
pub fn edge_label(count: u32) -> String {
    if count > 1 {
        format!("Reciprocal link (x{})", count)
    } else {
        "One-way link".to_string()
    }
}
