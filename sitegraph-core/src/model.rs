use serde::{Deserialize, Serialize};

/// Export format accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(InputFormat::Csv),
            "json" => Some(InputFormat::Json),
            _ => None,
        }
    }

    /// Guess the format from a file name: `.csv` is CSV, anything else JSON
    pub fn from_file_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".csv") {
            InputFormat::Csv
        } else {
            InputFormat::Json
        }
    }
}

/// One crawled page plus its SEO signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub seo: SeoMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_depth: Option<u32>,
    #[serde(default)]
    pub is_no_index: bool,
    #[serde(default)]
    pub is_orphan: bool,
    #[serde(default)]
    pub internal_link_equity: u64,
    #[serde(default)]
    pub content_analysis: ContentAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    #[serde(default)]
    pub outgoing_internal_links: Vec<String>,
}

impl PageRecord {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            url,
            seo: SeoMetadata::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.seo.crawl_depth = Some(depth);
        self
    }

    pub fn with_link_equity(mut self, inlinks: u64) -> Self {
        self.seo.internal_link_equity = inlinks;
        self
    }

    pub fn with_no_index(mut self, no_index: bool) -> Self {
        self.seo.is_no_index = no_index;
        self
    }

    pub fn with_outgoing_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seo.content_analysis.outgoing_internal_links =
            links.into_iter().map(Into::into).collect();
        self
    }

    pub fn outgoing_links(&self) -> &[String] {
        &self.seo.content_analysis.outgoing_internal_links
    }
}

/// An aggregated, undirected relationship between two pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub count: u32,
    pub weight: u32,
    pub length: f64,
    pub label: String,
    pub is_reciprocal: bool,
}

impl Edge {
    /// Order-independent key for a page pair
    pub fn canonical_key(a: &str, b: &str) -> String {
        if a <= b {
            format!("{}|{}", a, b)
        } else {
            format!("{}|{}", b, a)
        }
    }
}

/// Output of the engine: the page index and its edge set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDataset {
    pub full_search_index: Vec<PageRecord>,
    pub edges: Vec<Edge>,
}

impl GraphDataset {
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.full_search_index.iter().find(|p| p.url == url)
    }

    /// Largest known crawl depth, `None` when no page has one
    pub fn max_depth(&self) -> Option<u32> {
        self.full_search_index
            .iter()
            .filter_map(|p| p.seo.crawl_depth)
            .max()
    }
}
