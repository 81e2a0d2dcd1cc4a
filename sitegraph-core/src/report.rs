// Report generation from a built dataset

use crate::classify::RuleSet;
use crate::config::DisplayConfig;
use crate::model::GraphDataset;
use crate::view::{
    DatasetSummary, DisplayMode, LegendEntry, NodeView, PageInspection, inspect, legend,
    node_views, ranked_pages, summary,
};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub mode: DisplayMode,
    pub summary: DatasetSummary,
    pub legend: Vec<LegendEntry>,
    /// Node views ordered by link equity, highest first
    pub nodes: Vec<NodeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection: Option<PageInspection>,
}

pub fn gather_report_data(
    dataset: &GraphDataset,
    mode: DisplayMode,
    rules: &RuleSet,
    display: &DisplayConfig,
    selected: Option<&str>,
) -> ReportData {
    let mut views: HashMap<String, NodeView> = node_views(dataset, mode, rules, display)
        .into_iter()
        .map(|v| (v.id.clone(), v))
        .collect();

    let nodes = ranked_pages(dataset)
        .into_iter()
        .filter_map(|page| views.remove(&page.url))
        .collect();

    ReportData {
        mode,
        summary: summary(dataset, display),
        legend: legend(mode, dataset, rules),
        nodes,
        inspection: selected.and_then(|url| inspect(dataset, url)),
    }
}

fn swatch(color: &str, colorize: bool) -> String {
    match (colorize, parse_hex_color(color)) {
        (true, Some((r, g, b))) => "●".truecolor(r, g, b).to_string(),
        _ => "●".to_string(),
    }
}

/// `#rrggbb` -> rgb components
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

pub fn generate_text_report(data: &ReportData, colorize: bool) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                          SITEGRAPH LINK STRUCTURE REPORT\n");
    report.push_str(RULE);
    report.push('\n');

    let s = &data.summary;
    report.push_str(&format!("View mode:        {}\n", data.mode.as_str()));
    report.push_str(&format!("Pages:            {}\n", s.total_pages));
    report.push_str(&format!("Links:            {}\n", s.total_links));
    report.push_str(&format!("Reciprocal links: {}\n", s.reciprocal_links));
    report.push_str(&format!("Orphan pages:     {}\n", s.orphan_pages));
    report.push_str(&format!("NoIndex pages:    {}\n", s.no_index_pages));
    report.push_str(&format!(
        "Max crawl depth:  {}\n",
        s.max_depth.map(|d| d.to_string()).unwrap_or_else(|| "N/A".to_string())
    ));
    if s.offer_clustering {
        report.push_str("Note:             large graph, clustering recommended\n");
    }
    report.push('\n');

    report.push_str(RULE);
    report.push_str("LEGEND\n");
    report.push_str(RULE);
    report.push('\n');
    for entry in &data.legend {
        report.push_str(&format!(
            "  {} {}  {}\n",
            swatch(&entry.color, colorize),
            entry.color,
            entry.label
        ));
    }
    report.push('\n');

    if let Some(ref page) = data.inspection {
        report.push_str(RULE);
        report.push_str("PAGE INSPECTOR\n");
        report.push_str(RULE);
        report.push('\n');
        report.push_str(&format!("Title:     {}\n", page.title));
        report.push_str(&format!("URL:       {}\n", page.url));
        report.push_str(&format!("Depth:     {}\n", page.depth));
        report.push_str(&format!("Inlinks:   {}\n", page.inlinks));
        report.push_str(&format!("Outlinks:  {}\n", page.outlinks));
        report.push_str(&format!("Status:    {}\n", page.status));
        report.push('\n');
    }

    report.push_str(RULE);
    report.push_str("PAGES (by inbound links)\n");
    report.push_str(RULE);
    report.push('\n');
    if data.nodes.is_empty() {
        report.push_str("  (empty)\n");
    }
    for node in &data.nodes {
        report.push_str(&format!(
            "  {} {:>5}  {:<28} {}\n",
            swatch(&node.color, colorize),
            node.value.saturating_sub(1),
            node.label,
            node.id
        ));
    }
    report.push('\n');

    report.push_str(RULE);
    report.push_str("\nGenerated by sitegraph\n\n");

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "sitegraph",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
            },
            "mode": data.mode.as_str(),
            "summary": data.summary,
            "legend": data.legend,
            "nodes": data.nodes,
            "inspection": data.inspection,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
