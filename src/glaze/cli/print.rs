use chrono::{DateTime, Utc};
use colored::Colorize;
use glaze::api::{CmdMessage, MessageLevel};
use glaze::commands::{ListedPiece, TagSummary};
use glaze::config::{GlazeConfig, CONFIG_KEYS};
use glaze::gallery::FilterState;
use glaze::lightbox::LightboxImage;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FEATURED_MARKER: &str = "★";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_pieces(pieces: &[ListedPiece]) {
    if pieces.is_empty() {
        println!("No pieces found.");
        return;
    }

    for listed in pieces {
        let piece = &listed.entry.piece;
        let idx_str = format!("{}. ", listed.position);
        let marker = if piece.featured {
            format!("{} ", FEATURED_MARKER)
        } else {
            "  ".to_string()
        };

        let tags = piece
            .techniques
            .iter()
            .chain(piece.colors.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let line = format!("{} ({}) {}", piece.title, listed.entry.slug, tags);

        let fixed_width = marker.width() + idx_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let display = truncate_to_width(&line, available);
        let padding = available.saturating_sub(display.width());

        println!(
            "{}{}{}{}{}",
            marker.yellow(),
            idx_str,
            display,
            " ".repeat(padding),
            format_time_ago(piece.date).dimmed()
        );
    }
}

pub(crate) fn print_piece(listed: &ListedPiece, images: &[LightboxImage]) {
    let piece = &listed.entry.piece;
    println!("{}", piece.title.bold());
    println!("--------------------------------");
    println!("{}  {}", "slug".dimmed(), listed.entry.slug);
    println!("{}  {}", "date".dimmed(), piece.date.format("%Y-%m-%d"));
    println!("{}  {}", "techniques".dimmed(), piece.techniques.join(", "));
    println!("{}  {}", "colors".dimmed(), piece.colors.join(", "));
    if let Some(textures) = &piece.textures {
        println!("{}  {}", "textures".dimmed(), textures.join(", "));
    }
    if piece.featured {
        println!("{}", "featured".yellow());
    }
    if !piece.description.is_empty() {
        println!();
        println!("{}", piece.description);
    }
    println!();
    for (i, image) in images.iter().enumerate() {
        println!("  {}. {} {}", i, image.src, image.alt.dimmed());
    }
}

pub(crate) fn print_tags(tags: &TagSummary) {
    println!("{}", "Techniques".bold());
    for tag in &tags.techniques {
        println!("  {}", tag);
    }
    println!("{}", "Colors".bold());
    for tag in &tags.colors {
        println!("  {}", tag);
    }
}

pub(crate) fn print_state(state: &FilterState, query: &str) {
    if query.is_empty() {
        println!("{}", "(no query)".dimmed());
    } else {
        println!("{}", query);
    }
    if !state.techniques.is_empty() {
        println!("{}  {}", "technique".dimmed(), state.techniques.join(", "));
    }
    if !state.colors.is_empty() {
        println!("{}  {}", "color".dimmed(), state.colors.join(", "));
    }
    if state.featured_only {
        println!("{}  true", "featured".dimmed());
    }
    println!("{}  {}", "sort".dimmed(), state.sort);
}

pub(crate) fn print_config(config: &GlazeConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
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
