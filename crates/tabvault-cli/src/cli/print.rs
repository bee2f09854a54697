use chrono::{DateTime, Utc};
use colored::Colorize;
use tabvault::commands::{BackupInfo, CmdMessage, MessageLevel};
use tabvault::model::Document;
use tabvault::search::DocumentMatches;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PIN_MARKER: &str = "⚲";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_full_documents(documents: &[Document]) {
    for (i, doc) in documents.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", format!("{}.", doc.id).yellow(), doc.name.bold());
        println!("--------------------------------");
        println!("{}", doc.content);
    }
}

pub(super) fn print_documents(documents: &[Document]) {
    if documents.is_empty() {
        println!("No documents found.");
        return;
    }

    let mut last_was_pinned = false;
    for (i, doc) in documents.iter().enumerate() {
        let pinned = doc.attributes.is_pinned();
        if i > 0 && last_was_pinned && !pinned {
            println!();
        }
        last_was_pinned = pinned;

        let left_prefix = if pinned {
            format!("  {} ", PIN_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", doc.id);

        let preview: String = doc
            .content
            .chars()
            .take(50)
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .collect();
        let name_preview = if preview.trim().is_empty() {
            doc.name.clone()
        } else {
            format!("{}  {}", doc.name, preview)
        };

        let fixed_width = left_prefix.width() + idx_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let shown = truncate_to_width(&name_preview, available);
        let padding = available.saturating_sub(shown.width());

        let stamp = doc
            .attributes
            .updated_at()
            .or_else(|| doc.attributes.created_at())
            .map(format_time_ago)
            .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

        let idx_colored = if pinned {
            idx_str.yellow()
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{}{}{}",
            left_prefix,
            idx_colored,
            shown,
            " ".repeat(padding),
            stamp.dimmed()
        );
    }
}

pub(super) fn print_search_results(results: &[DocumentMatches]) {
    for (i, doc) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", format!("{}.", doc.document_id).yellow(), doc.name.bold());
        for m in &doc.matches {
            println!(
                "  {:>4}: {}{}{}",
                m.line_number.to_string().dimmed(),
                &m.line[..m.start],
                m.matched_text().red().bold(),
                &m.line[m.end..]
            );
        }
    }
}

pub(super) fn print_backup_info(info: &BackupInfo) {
    println!("{} {}", "Version:".bold(), info.version);
    println!("{} {}", "Exported:".bold(), info.timestamp);
    if !info.exported_by.is_empty() {
        println!("{} {}", "Exported by:".bold(), info.exported_by);
    }
    println!("{} {}", "Tabs:".bold(), info.tab_names.len());
    for name in &info.tab_names {
        println!("    {}", name);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("notes.md", 20), "notes.md");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK character is two columns wide.
        let out = truncate_to_width("日本語テキスト", 7);
        assert_eq!(out, "日本語…");
    }

    #[test]
    fn test_time_ago_is_right_aligned() {
        let out = format_time_ago(Utc::now());
        assert_eq!(out.width(), TIME_WIDTH);
    }
}
