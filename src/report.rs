//! Render run summaries as text or JSON.

use crate::error::LinkerError;
use crate::library::{LibraryOutcome, LibraryReport};
use crate::pipeline::RunSummary;
use crate::reconcile::{ClearReport, LinkOutcome, MediaRootReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, LinkerError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(LinkerError::Config(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, LinkerError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LinkerError::Config(format!("Failed to serialize output: {}", e)))
}

pub fn render_run(summary: &RunSummary, format: OutputFormat) -> Result<String, LinkerError> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Text => Ok(format_run_text(summary)),
    }
}

pub fn render_clear(report: &ClearReport, format: OutputFormat) -> Result<String, LinkerError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => Ok(format_clear_text(report)),
    }
}

/// Human-readable summary of a `create` run.
pub fn format_run_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Genre Linker")));
    out.push_str(&format!("  Started: {}\n", summary.started_at));
    out.push_str(&format!("  Catalog items: {}\n", summary.catalog_items));
    out.push_str(&format!(
        "  Symlinks removed: {}\n",
        summary.clear.removed
    ));
    out.push_str(&format!(
        "  Genre folders: {} ({} created)\n\n",
        summary.folders.genres,
        summary.folders.created.len()
    ));

    for media in &summary.media {
        out.push_str(&format_media_text(media));
    }

    if let Some(ref libraries) = summary.libraries {
        out.push_str(&format_libraries_text(libraries));
    }

    out.push_str(&format!(
        "Genre linking complete: {} items linked\n",
        summary.linked_items()
    ));
    out
}

fn format_media_text(media: &MediaRootReport) -> String {
    let mut out = String::new();
    let title = match media.item_type {
        crate::catalog::ItemType::Movie => "Movies",
        crate::catalog::ItemType::Series => "TV Shows",
    };
    out.push_str(&format!("{}\n\n", format_section_heading(title)));
    out.push_str(&format!("  Root: {}\n", media.root.display()));
    if !media.scanned {
        out.push_str("  Scanned: no (path missing or unreadable)\n\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Outcome", "Count"]);
    table.add_row(vec!["Folders".to_string(), media.processed().to_string()]);
    table.add_row(vec!["Linked items".to_string(), media.linked_items().to_string()]);
    table.add_row(vec![
        "Unmatched".to_string(),
        media.unmatched().count().to_string(),
    ]);
    table.add_row(vec![
        "Links created".to_string(),
        media.count_outcome(LinkOutcome::is_linked).to_string(),
    ]);
    table.add_row(vec![
        "Conflicts skipped".to_string(),
        media
            .count_outcome(|o| matches!(o, LinkOutcome::ConflictSkipped))
            .to_string(),
    ]);
    table.add_row(vec![
        "Link failures".to_string(),
        media
            .count_outcome(|o| matches!(o, LinkOutcome::Failed(_)))
            .to_string(),
    ]);
    out.push_str(&format!("{}\n", table));

    let unmatched: Vec<&str> = media.unmatched().map(|e| e.name.as_str()).collect();
    if !unmatched.is_empty() {
        out.push_str("  No match:\n");
        for name in unmatched {
            out.push_str(&format!("    {}\n", name));
        }
    }
    out.push('\n');
    out
}

fn format_libraries_text(report: &LibraryReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Libraries")));
    out.push_str(&format!("  Collection type: {}\n", report.collection_type));
    if let Some(ref err) = report.list_error {
        out.push_str(&format!("  Listing failed: {}\n", err));
    }
    if report.results.is_empty() {
        out.push_str("  No genre libraries.\n\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Library", "Path", "Result"]);
    for result in &report.results {
        let outcome = match &result.outcome {
            LibraryOutcome::Created => "created".to_string(),
            LibraryOutcome::Updated => "updated".to_string(),
            LibraryOutcome::PathAdded => "path added".to_string(),
            LibraryOutcome::MissingFolder => "no folder".to_string(),
            LibraryOutcome::RemoteFailure(e) => format!("failed: {}", e),
        };
        table.add_row(vec![result.library.clone(), result.path.clone(), outcome]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!(
        "  Refresh: {}\n\n",
        if report.refreshed { "requested" } else { "failed" }
    ));
    out
}

/// Human-readable summary of a `clear` run.
pub fn format_clear_text(report: &ClearReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Clear Symlinks")));
    out.push_str(&format!("  Root: {}\n", report.root.display()));
    if !report.existed {
        out.push_str("  Genre root does not exist, nothing to clear.\n");
        return out;
    }
    if !report.per_folder.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Genre", "Removed"]);
        for (folder, count) in &report.per_folder {
            table.add_row(vec![folder.clone(), count.to_string()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    for failure in &report.failures {
        out.push_str(&format!(
            "  Failed: {} ({})\n",
            failure.path.display(),
            failure.reason
        ));
    }
    out.push_str(&format!(
        "Removed {} of {} symlinks\n",
        report.removed, report.found
    ));
    out
}
