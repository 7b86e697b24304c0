use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::merge::ConsolidatedRecord;
use crate::ranking::Ranking;

const UNIDENTIFIED: &str = "(no website)";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score in compact notation (1.5k, 2.3M, 36.21)
/// If fallback is true, appends asterisk to mark a substituted reputation score
pub fn format_score(score: f64, fallback: bool) -> String {
    let formatted = if score >= 1_000_000.0 {
        format!("{:.1}M", score / 1_000_000.0)
    } else if score >= 1_000.0 {
        format!("{:.1}k", score / 1_000.0)
    } else {
        format!("{:.2}", score)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    let trimmed = formatted
        .replace(".0M", "M")
        .replace(".0k", "k");

    if fallback {
        format!("{}*", trimmed)
    } else {
        trimmed
    }
}

fn domain_label(entry: &ConsolidatedRecord) -> &str {
    if entry.is_unidentified() {
        UNIDENTIFIED
    } else {
        &entry.canonical_key
    }
}

/// Names for display; unnamed groups show their domain instead.
fn display_name(entry: &ConsolidatedRecord) -> String {
    if entry.organization_names.is_empty() {
        domain_label(entry).to_string()
    } else {
        entry.display_name()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn format_indicators(indicators: &[u8]) -> String {
    indicators
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the ranking as a table with columns: Index, Score, Sources, Names, Domain
/// No headers. Index column right-aligned with trailing dot, score column 9 chars wide.
pub fn format_ranking_table(ranking: &Ranking, use_colors: bool) -> String {
    if ranking.is_empty() {
        return "No organizations found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 4;
    let score_width = 9;
    let separator = "  ";

    ranking
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format_score(entry.final_score, entry.weighted_rating.is_none());
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let indicators = format_indicators(&ranking.indicators(entry));
            let domain = domain_label(entry);

            let fixed_width = index_width + 1 + score_width + separator.len() * 3 + indicators.len() + domain.chars().count();
            let name = display_name(entry);
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_text(&name, width - fixed_width),
                Some(_) => truncate_text(&name, 20),
                None => name,
            };
            let conflict = if entry.name_conflict { "!" } else { "" };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    indicators.cyan(),
                    separator,
                    name,
                    conflict.yellow(),
                    separator,
                    domain.underline()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}",
                    index_str, score_padded, separator, indicators, separator, name, conflict, separator, domain
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header line naming the indicator columns, e.g. "Sources: 1=Datei 1  2=Datei 2"
pub fn format_source_legend(ranking: &Ranking) -> String {
    let legend = ranking
        .sources
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}={} (w={})", i + 1, s.label, s.weight))
        .collect::<Vec<_>>()
        .join("  ");
    format!("Sources: {}", legend)
}

/// Format one organization with detailed multi-line output (for verbose mode)
pub fn format_entry_detail(ranking: &Ranking, entry: &ConsolidatedRecord, use_colors: bool) -> String {
    let rating = entry
        .weighted_rating
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "-".to_string());
    let present: Vec<&str> = entry
        .present_in
        .iter()
        .filter_map(|&i| ranking.sources.get(i).map(|s| s.label.as_str()))
        .collect();
    let names = display_name(entry);
    let conflict = if entry.name_conflict { " (names differ)" } else { "" };

    let lines = [
        format!("  Domain: {}", domain_label(entry)),
        format!("  Website: {}", entry.website.as_deref().unwrap_or("-")),
        format!("  Phone: {}", entry.phone.as_deref().unwrap_or("-")),
        format!("  Address: {}", entry.address.as_deref().unwrap_or("-")),
        format!("  Sources: {} ({} rows)", present.join(", "), entry.record_count),
        format!("  Rating: {} from {} reviews", rating, entry.total_reviews),
        format!(
            "  Scores: frequency {:.2}, reputation {:.2}, final {:.2}",
            entry.frequency_score, entry.reputation_score, entry.final_score
        ),
    ]
    .join("\n");

    if use_colors {
        format!("{}{}\n{}", names.bold(), conflict.yellow(), lines)
    } else {
        format!("{}{}\n{}", names, conflict, lines)
    }
}

/// Format the ranking as tab-separated values for scripting
/// Columns: final score, names, domain, frequency score, reputation score (no headers, no colors)
pub fn format_tsv(ranking: &Ranking) -> String {
    ranking
        .entries
        .iter()
        .map(|entry| {
            format!(
                "{:.2}\t{}\t{}\t{:.2}\t{:.2}",
                entry.final_score,
                entry.display_name(),
                entry.canonical_key,
                entry.frequency_score,
                entry.reputation_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
