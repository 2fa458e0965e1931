//! Contour CLI
//!
//! Infers CSS layout for a design tree export and prints the decisions.
//!
//! Run with: cargo run --bin contour -- design.json
//!
//! Set `RUST_LOG=contour_layout=trace` to follow every regroup and
//! strategy decision.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use contour_common::Diagnostics;
use contour_common::warning::{clear_warnings, warn_diagnostics};
use contour_layout::{
    HeuristicConfig, LayoutDecision, LayoutProperties, LayoutReport, LayoutStrategy, infer_layout,
};
use contour_tree::SourceNode;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Contour: layout inference for absolutely positioned design exports
#[derive(Parser, Debug)]
#[command(name = "contour")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the resolved tree with inferred layout
    contour design.json

    # Machine-readable output
    contour design.json --format json

    # Override heuristic thresholds
    contour design.json --config thresholds.json

    # Follow decisions as they are made
    RUST_LOG=contour_layout=trace contour design.json
"#)]
struct Cli {
    /// Design tree export (JSON)
    #[arg(value_name = "FILE")]
    design: PathBuf,

    /// JSON file overriding heuristic thresholds; unspecified fields keep
    /// their defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Do not print diagnostics
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Indented tree with strategy and properties per node
    Text,
    /// One JSON document with decisions, properties and diagnostics
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let source = load_design(&cli.design)?;

    clear_warnings();
    let report = infer_layout(&source, &config);
    source.dismantle();
    if !cli.quiet {
        warn_diagnostics("layout", &report.diagnostics);
    }

    match cli.format {
        Format::Text => print_report(&report),
        Format::Json => {
            let json = serde_json::to_string_pretty(&JsonReport::new(&report))
                .context("failed to serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Load and validate heuristic overrides, or the defaults.
fn load_config(path: Option<&Path>) -> Result<HeuristicConfig> {
    let Some(path) = path else {
        return Ok(HeuristicConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: HeuristicConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    log::debug!("loaded heuristic overrides from {}", path.display());
    Ok(config)
}

/// Load a design tree export.
fn load_design(path: &Path) -> Result<SourceNode> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read design {}", path.display()))?;
    let source = SourceNode::from_json(&text)
        .with_context(|| format!("failed to parse design {}", path.display()))?;
    log::info!(
        "loaded {} nodes from {}",
        source.descendant_count() + 1,
        path.display()
    );
    Ok(source)
}

/// Print the resolved tree, one node per line followed by its declarations.
fn print_report(report: &LayoutReport) {
    println!("=== Layout ({} nodes) ===\n", report.plan.len());

    for entry in &report.plan {
        let node = &report.tree[entry.node];
        let indent = "  ".repeat(report.tree.depth(entry.node));
        let decision = &entry.decision;

        println!(
            "{indent}[{}] {} {} ({})",
            entry.id,
            node.name,
            strategy_label(decision),
            decision.placement
        );
        if let Some(props) = report.properties(entry.node).filter(|p| !p.is_empty()) {
            println!("{indent}  {props}");
        }
    }
}

fn strategy_label(decision: &LayoutDecision) -> String {
    let label = decision.strategy.as_ref();
    match decision.strategy {
        LayoutStrategy::Flexbox => label.green().to_string(),
        LayoutStrategy::Grid => label.cyan().to_string(),
        LayoutStrategy::Absolute => label.yellow().to_string(),
        LayoutStrategy::Static => label.dimmed().to_string(),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    nodes: Vec<JsonNode<'a>>,
    diagnostics: &'a Diagnostics,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    id: &'a str,
    decision: &'a LayoutDecision,
    properties: LayoutProperties,
}

impl<'a> JsonReport<'a> {
    fn new(report: &'a LayoutReport) -> Self {
        let nodes = report
            .plan
            .iter()
            .map(|entry| JsonNode {
                id: &entry.id,
                decision: &entry.decision,
                properties: report.properties(entry.node).unwrap_or_default(),
            })
            .collect();
        Self {
            nodes,
            diagnostics: &report.diagnostics,
        }
    }
}
