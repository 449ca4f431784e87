//! CLI output formatting for every subcommand.
//!
//! # Information-First Display
//!
//! Output leads with what the user cares about (section names, item
//! counts, result titles) and shows paths and URLs as indented context
//! lines underneath.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Sam Taylor → index.html
//! 001 profileAvatar
//! 002 skillsContainer (2 items)
//! 003 experienceTimeline (2 items)
//! 006 mediaCarousel (empty)
//!
//! Search → search-index.json?v=3f2a9c0d11e4 (5 entries)
//! Assets: 3 files
//! Generated 9 sections in dist
//! ```
//!
//! ## Search
//!
//! ```text
//! 001 📝 Ownership in practice
//!     Article • Lessons from moving a service off garbage collection.
//!     https://medium.example/ownership-in-practice
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{CheckReport, GenerateReport, SectionReport};
use crate::page::MountId;
use crate::search::{SearchOutcome, truncate_text};
use crate::theme::Theme;

const DESCRIPTION_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

/// One line per section: position, mount id, item count.
///
/// The avatar and QR code are single elements, so no count is shown for them.
fn section_lines(sections: &[SectionReport]) -> Vec<String> {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let id = s.mount.id();
            match (s.mount, s.items) {
                (MountId::ProfileAvatar | MountId::QrCode, _) => {
                    format!("{} {}", format_index(i + 1), id)
                }
                (_, 0) => format!("{} {} (empty)", format_index(i + 1), id),
                (_, n) => format!("{} {} ({})", format_index(i + 1), id, plural(n, "item", "items")),
            }
        })
        .collect()
}

// ============================================================================
// build
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("{} → index.html", report.title)];

    if report.content_loaded {
        lines.extend(section_lines(&report.sections));
    } else {
        lines.push("    Content unavailable: sections left empty".to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "Search → {} ({})",
        report.search_url,
        plural(report.search_entries, "entry", "entries")
    ));
    lines.push(format!("Assets: {}", plural(report.assets_copied, "file", "files")));
    lines.push(format!(
        "Generated {} in {}",
        plural(report.sections.len(), "section", "sections"),
        report.output_dir.display()
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    match &report.config_path {
        Some(path) => lines.push(format!("Config: {}", path.display())),
        None => lines.push("Config: stock defaults".to_string()),
    }
    lines.push(format!("Content: {}", report.content_path.display()));
    lines.push(String::new());
    lines.push("Sections".to_string());
    lines.extend(section_lines(&report.sections));
    lines.push(String::new());
    lines.push("OK".to_string());
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// search
// ============================================================================

pub fn format_search_output(outcome: &SearchOutcome<'_>) -> Vec<String> {
    match outcome {
        SearchOutcome::Hidden => vec!["Empty query".to_string()],
        SearchOutcome::NoResults => vec!["No results found".to_string()],
        SearchOutcome::Results(hits) => {
            let mut lines = Vec::new();
            for (i, hit) in hits.iter().enumerate() {
                lines.push(format!("{} {} {}", format_index(i + 1), hit.icon, hit.title));
                let description = truncate_text(hit.description.trim(), DESCRIPTION_CHARS);
                if description.is_empty() {
                    lines.push(format!("    {}", hit.kind));
                } else {
                    lines.push(format!("    {} • {}", hit.kind, description));
                }
                if !hit.url.is_empty() {
                    lines.push(format!("    {}", hit.url));
                }
            }
            lines
        }
    }
}

pub fn print_search_output(outcome: &SearchOutcome<'_>) {
    for line in format_search_output(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// theme / avatar
// ============================================================================

pub fn format_theme(theme: Theme) -> String {
    format!("Theme: {} {}", theme, theme.icon())
}

pub fn print_theme(theme: Theme) {
    println!("{}", format_theme(theme));
}

pub fn format_avatar_saved(data_url: &str) -> String {
    format!(
        "Profile picture updated successfully! ✨ ({} stored)",
        format_size(data_url.len())
    )
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
