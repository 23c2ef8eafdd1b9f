use chrono::{DateTime, Utc};
use colored::Colorize;
use pagekeep::api::{CmdMessage, MessageLevel};
use pagekeep::commands::ListedPage;
use pagekeep::config::AppConfig;
use pagekeep::model::Page;
use pagekeep::templates::PageTemplate;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const CURRENT_MARKER: &str = "▸";
const FAVORITE_MARKER: &str = "★";

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

pub(super) fn print_pages(pages: &[ListedPage]) {
    for row in pages {
        println!("{}", format_row(row));
    }
}

fn format_row(row: &ListedPage) -> String {
    let marker = if row.is_current { CURRENT_MARKER } else { " " };
    let left_prefix = format!("  {} {}", marker, "  ".repeat(row.depth));
    let right_suffix = if row.page.is_favorite() {
        format!("{} ", FAVORITE_MARKER)
    } else {
        "  ".to_string()
    };

    let mut label = row.page.display_title();
    if let Some(tags) = row.page.tags.as_ref().filter(|t| !t.is_empty()) {
        label = format!("{} #{}", label, tags.join(" #"));
    }

    let fixed_width = left_prefix.width() + right_suffix.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let label = truncate_to_width(&label, available);
    let padding = available.saturating_sub(label.width());

    let label = if row.is_current {
        label.bold().to_string()
    } else {
        label
    };
    format!(
        "{}{}{}{}{}",
        left_prefix.yellow(),
        label,
        " ".repeat(padding),
        right_suffix.yellow(),
        format_time_ago(row.page.updated_at).dimmed()
    )
}

pub(super) fn print_page(page: &Page, breadcrumbs: &[Page], children: &[ListedPage], body: &str) {
    if !breadcrumbs.is_empty() {
        let path: Vec<&str> = breadcrumbs.iter().map(|p| p.title.as_str()).collect();
        println!("{}", path.join(" › ").dimmed());
    }
    let star = if page.is_favorite() {
        format!(" {}", FAVORITE_MARKER.yellow())
    } else {
        String::new()
    };
    println!("{}{}", page.display_title().bold(), star);

    let mut meta = vec![
        format!("id {}", page.id),
        format!("updated {}", format_time_ago(page.updated_at).trim()),
    ];
    if let Some(tags) = page.tags.as_ref().filter(|t| !t.is_empty()) {
        meta.push(format!("tags {}", tags.join(", ")));
    }
    println!("{}", meta.join(" · ").dimmed());
    println!("--------------------------------");
    println!("{}", body.trim_end());

    if !children.is_empty() {
        println!();
        println!("{}", "Subpages".dimmed());
        print_pages(children);
    }
}

pub(super) fn print_templates(templates: &[PageTemplate]) {
    let id_width = templates.iter().map(|t| t.id.width()).max().unwrap_or(0);
    for template in templates {
        let category = template
            .category
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();
        println!(
            "  {} {}  {}{}  {}",
            template.icon,
            format!("{:<width$}", template.id, width = id_width).yellow(),
            template.name,
            category.dimmed(),
            template.description.dimmed()
        );
    }
}

pub(super) fn print_config(config: &AppConfig) {
    println!("debounce_ms = {}", config.debounce_ms);
    println!("server_addr = {}", config.server_addr);
    println!(
        "remote_url = {}",
        config.remote_url.as_deref().unwrap_or("(unset)")
    );
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
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekeep::model::NewPage;

    #[test]
    fn truncates_wide_text_with_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("ab", 4), "ab");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
    }

    #[test]
    fn rows_fit_the_line_width() {
        colored::control::set_override(false);
        let page = NewPage::new("1", "x".repeat(200)).into_page(Utc::now());
        let row = ListedPage {
            page,
            depth: 2,
            is_current: true,
        };
        let line = format_row(&row);
        assert_eq!(line.width(), LINE_WIDTH);
        assert!(line.starts_with("  ▸     x"));
    }
}
