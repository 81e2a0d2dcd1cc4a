// Renderer-facing view of a dataset: node styles, legend, inspector, page list

use crate::classify::{
    COLOR_NEUTRAL, CompiledRule, EquityStatus, RuleSet, depth_color, is_orphan, topic_color,
};
use crate::config::DisplayConfig;
use crate::model::{GraphDataset, PageRecord};
use serde::{Deserialize, Serialize};

const ELLIPSIS: char = '…';
const INVALID_RULE_COLOR: &str = "#888888";

/// How nodes are colored and labelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    #[default]
    LinkEquity,
    CrawlDepth,
    TopicCluster,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::LinkEquity => "link-equity",
            DisplayMode::CrawlDepth => "crawl-depth",
            DisplayMode::TopicCluster => "topic-cluster",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "link-equity" | "linkequity" | "equity" => Some(DisplayMode::LinkEquity),
            "crawl-depth" | "crawldepth" | "depth" => Some(DisplayMode::CrawlDepth),
            "topic-cluster" | "topiccluster" | "topic" => Some(DisplayMode::TopicCluster),
            _ => None,
        }
    }
}

/// Style of one node under a display mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub color: String,
    /// Node size hint, `1 + internalLinkEquity`
    pub value: u64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

impl LegendEntry {
    fn new(color: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            label: label.into(),
        }
    }
}

/// Details shown for a single selected page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInspection {
    pub title: String,
    pub url: String,
    pub depth: String,
    pub inlinks: u64,
    pub outlinks: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_pages: usize,
    pub total_links: usize,
    pub reciprocal_links: usize,
    pub orphan_pages: usize,
    pub no_index_pages: usize,
    pub max_depth: Option<u32>,
    pub offer_clustering: bool,
}

/// Cut `s` to `max_len` characters, appending an ellipsis when shortened
pub fn truncate_label(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let mut truncated: String = s.chars().take(max_len).collect();
        truncated.push(ELLIPSIS);
        truncated
    } else {
        s.to_string()
    }
}

fn depth_text(page: &PageRecord) -> String {
    page.seo
        .crawl_depth
        .map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Style every page for `mode`. Rules only matter for topic clustering.
pub fn node_views(
    dataset: &GraphDataset,
    mode: DisplayMode,
    rules: &RuleSet,
    display: &DisplayConfig,
) -> Vec<NodeView> {
    let max_depth = dataset.max_depth();

    dataset
        .full_search_index
        .iter()
        .map(|page| {
            let title_label = truncate_label(&page.title, display.label_max_len);
            let (color, label) = match mode {
                DisplayMode::CrawlDepth => (
                    depth_color(page.seo.crawl_depth, max_depth).to_string(),
                    depth_text(page),
                ),
                DisplayMode::TopicCluster => (topic_color(&page.url, rules), title_label),
                DisplayMode::LinkEquity => {
                    (EquityStatus::of(page).color().to_string(), title_label)
                }
            };

            NodeView {
                id: page.url.clone(),
                label,
                color,
                value: page.seo.internal_link_equity.saturating_add(1),
                tooltip: format!(
                    "{}\nInbound links: {}\nDepth: {}",
                    page.title,
                    page.seo.internal_link_equity,
                    depth_text(page)
                ),
            }
        })
        .collect()
}

/// Legend entries explaining the colors of `mode`
pub fn legend(mode: DisplayMode, dataset: &GraphDataset, rules: &RuleSet) -> Vec<LegendEntry> {
    match mode {
        DisplayMode::CrawlDepth => {
            let max_depth = dataset.max_depth();
            [(0, "Home"), (1, "Near"), (5, "Mid"), (10, "Far")]
                .into_iter()
                .map(|(depth, label)| LegendEntry::new(depth_color(Some(depth), max_depth), label))
                .collect()
        }
        DisplayMode::TopicCluster => {
            if rules.outcomes().is_empty() {
                return vec![LegendEntry::new(
                    COLOR_NEUTRAL,
                    "Each section (by path) gets its own color",
                )];
            }
            let mut entries: Vec<LegendEntry> = rules
                .outcomes()
                .iter()
                .map(|rule| match rule {
                    CompiledRule::Ok { regex, color } => LegendEntry::new(color, regex.as_str()),
                    CompiledRule::Skip { .. } => {
                        LegendEntry::new(INVALID_RULE_COLOR, "Invalid rule")
                    }
                })
                .collect();
            entries.push(LegendEntry::new(COLOR_NEUTRAL, "Other"));
            entries
        }
        DisplayMode::LinkEquity => [
            EquityStatus::Normal,
            EquityStatus::Orphan,
            EquityStatus::NoIndex,
        ]
        .into_iter()
        .map(|status| LegendEntry::new(status.color(), status.as_str()))
        .collect(),
    }
}

/// Inspector details for `url`, `None` when the page is not in the dataset
pub fn inspect(dataset: &GraphDataset, url: &str) -> Option<PageInspection> {
    let page = dataset.page(url)?;
    Some(PageInspection {
        title: page.title.clone(),
        url: page.url.clone(),
        depth: depth_text(page),
        inlinks: page.seo.internal_link_equity,
        outlinks: page.outgoing_links().len(),
        status: EquityStatus::of(page).as_str().to_string(),
    })
}

/// Pages by link equity, highest first; ties keep dataset order
pub fn ranked_pages(dataset: &GraphDataset) -> Vec<&PageRecord> {
    let mut pages: Vec<&PageRecord> = dataset.full_search_index.iter().collect();
    pages.sort_by(|a, b| {
        b.seo
            .internal_link_equity
            .cmp(&a.seo.internal_link_equity)
    });
    pages
}

/// Pages whose title contains `term`, ignoring case. An empty term matches all.
pub fn search_pages<'a>(dataset: &'a GraphDataset, term: &str) -> Vec<&'a PageRecord> {
    let term = term.trim().to_lowercase();
    dataset
        .full_search_index
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&term))
        .collect()
}

pub fn summary(dataset: &GraphDataset, display: &DisplayConfig) -> DatasetSummary {
    let pages = &dataset.full_search_index;
    DatasetSummary {
        total_pages: pages.len(),
        total_links: dataset.edges.len(),
        reciprocal_links: dataset.edges.iter().filter(|e| e.is_reciprocal).count(),
        orphan_pages: pages.iter().filter(|p| is_orphan(&p.seo)).count(),
        no_index_pages: pages.iter().filter(|p| p.seo.is_no_index).count(),
        max_depth: dataset.max_depth(),
        offer_clustering: pages.len() > display.cluster_threshold,
    }
}
