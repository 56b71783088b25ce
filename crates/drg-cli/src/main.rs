//! drgdiff: compare MS-DRG definitions between two dataset versions.
//!
//! Reads the Appendix A listing of both versions, classifies every DRG code
//! into one change category, and prints summary counts plus optional
//! per-category examples with highlighted description diffs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use strum::IntoEnumIterator;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

use drg_compare::{Change, ChangeKind, ComparisonReport, MarkedText, highlight};
use drg_core::{VersionCatalog, read_appendix};

/// Compare MS-DRG definitions between two dataset versions
#[derive(Parser, Debug)]
#[command(name = "drgdiff", author, version, about, long_about = None)]
struct Args {
    /// Older version to compare (e.g. v40)
    old_version: String,

    /// Newer version to compare (e.g. v41)
    new_version: String,

    /// Show only the summary counts (the default output)
    #[arg(long, conflicts_with = "examples")]
    summary: bool,

    /// Show up to N examples per change category
    #[arg(long, value_name = "N")]
    examples: Option<usize>,

    /// Root directory holding the versioned definition data
    #[arg(long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Emit the full comparison as pretty-printed JSON
    #[arg(long, conflicts_with_all = ["summary", "examples"])]
    json: bool,

    /// Increase diagnostic logging on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            print_available_versions(&args.data_dir);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let catalog = VersionCatalog::discover(&args.data_dir)
        .with_context(|| format!("no usable data directory at {}", args.data_dir.display()))?;
    let (old_path, new_path) = catalog.resolve_pair(&args.old_version, &args.new_version)?;
    info!(old = %args.old_version, new = %args.new_version, "comparing versions");
    debug!(
        summary = args.summary,
        examples = ?args.examples,
        json = args.json,
        "output mode"
    );

    let old = read_appendix(&old_path)
        .with_context(|| format!("failed to parse {}", old_path.display()))?;
    let new = read_appendix(&new_path)
        .with_context(|| format!("failed to parse {}", new_path.display()))?;
    debug!(old_records = old.len(), new_records = new.len(), "record sets parsed");

    let report =
        ComparisonReport::new(args.old_version.as_str(), args.new_version.as_str(), &old, &new);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "=== Comparing DRG definitions between {} and {} ===",
        args.old_version, args.new_version
    );
    println!();
    print!("{report}");

    if let Some(limit) = args.examples {
        print_examples(&report, limit, use_color());
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}

/// Colors only when stdout is an interactive terminal.
fn use_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Best-effort hint printed after errors.
fn print_available_versions(data_dir: &Path) {
    let Ok(catalog) = VersionCatalog::discover(data_dir) else {
        return;
    };
    let versions = catalog.versions();
    if versions.is_empty() {
        eprintln!("available versions: none under {}", catalog.root().display());
    } else {
        eprintln!("available versions: {}", versions.join(", "));
    }
}

/// Print up to `limit` entries per category, skipping empty categories and
/// the unchanged bucket.
fn print_examples(report: &ComparisonReport, limit: usize, color: bool) {
    if limit == 0 {
        return;
    }
    for kind in ChangeKind::iter() {
        if kind == ChangeKind::Unchanged {
            continue;
        }
        let total = report.counts.get(kind);
        if total == 0 {
            continue;
        }
        println!();
        println!("{} (showing {} of {}):", category_heading(kind), limit.min(total), total);
        for change in report.changes.of_kind(kind).take(limit) {
            print_change(report, change, color);
        }
    }
}

fn category_heading(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "New DRGs",
        ChangeKind::Removed => "Removed DRGs",
        ChangeKind::MdcChanged => "MDC changes",
        ChangeKind::TypeChanged => "Type changes (Medical/Surgical)",
        ChangeKind::DescriptionChanged => "Description changes",
        ChangeKind::Unchanged => "Unchanged DRGs",
    }
}

fn print_change(report: &ComparisonReport, change: &Change, color: bool) {
    match change {
        Change::Added { code, new } => {
            println!(
                "  DRG {code}: MDC={}, Type={}, Desc={}",
                new.mdc,
                new.type_label(),
                new.description
            );
        }
        Change::Removed { code, old } => {
            println!(
                "  DRG {code}: MDC={}, Type={}, Desc={}",
                old.mdc,
                old.type_label(),
                old.description
            );
        }
        Change::MdcChanged { code, old, new } => {
            println!("  DRG {code}:");
            println!("    {}: MDC={}", report.old_version, old.mdc);
            println!("    {}: MDC={}", report.new_version, new.mdc);
        }
        Change::TypeChanged { code, old, new } => {
            println!("  DRG {code}:");
            println!("    {}: Type={}", report.old_version, old.type_label());
            println!("    {}: Type={}", report.new_version, new.type_label());
        }
        Change::DescriptionChanged { code, old, new } => {
            let (old_marked, new_marked) = highlight(&old.description, &new.description);
            println!("  DRG {code}:");
            println!("    {}: {}", report.old_version, render_marked(&old_marked, true, color));
            println!("    {}: {}", report.new_version, render_marked(&new_marked, false, color));
        }
        Change::Unchanged { .. } => {}
    }
}

/// Render one side of a highlighted pair. Marked runs print red on the old
/// side and green on the new side.
fn render_marked(text: &MarkedText, old_side: bool, color: bool) -> String {
    let mut out = String::new();
    for span in text.spans() {
        if color && span.changed {
            let styled = if old_side {
                span.text.as_str().red()
            } else {
                span.text.as_str().green()
            };
            out.push_str(&styled.to_string());
        } else {
            out.push_str(&span.text);
        }
    }
    out
}
