use studyloop_lib::date::{format_date_distance, format_readable_date, format_relative_date};
use studyloop_lib::topics::algorithm::{format_interval, preview_intervals};
use studyloop_lib::topics::{Rating, Topic, TopicStatus};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

fn rating_color(rating: Rating) -> &'static str {
    match rating {
        Rating::Hard => Color::RED,
        Rating::Normal => Color::YELLOW,
        Rating::Easy => Color::GREEN,
    }
}

fn pluralize_days(days: u32) -> String {
    format!("{} day{}", days, if days != 1 { "s" } else { "" })
}

/// JSON representation shared by every command
pub fn topic_json(topic: &Topic) -> serde_json::Value {
    serde_json::json!({
        "id": topic.id.to_string(),
        "title": topic.title,
        "notes": topic.notes,
        "addedAt": topic.added_at.to_rfc3339(),
        "nextReview": topic.next_review.to_rfc3339(),
        "interval": topic.interval,
        "status": topic.status(),
        "history": topic.history,
    })
}

/// Full card for a single topic
pub fn render_topic_card(topic: &Topic, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(paint(&topic.title, Color::BOLD, use_color));
    lines.push(format!(
        "Next review: {} ({})",
        format_relative_date(&topic.next_review),
        format_date_distance(&topic.next_review)
    ));

    if let Some(notes) = &topic.notes {
        lines.push(String::new());
        lines.extend(notes.lines().map(|l| l.to_string()));
    }

    lines.push(String::new());
    lines.push(paint(
        &format!("Interval: {}", pluralize_days(topic.interval)),
        Color::DIM,
        use_color,
    ));
    lines.push(paint(
        &format!(
            "Added {} \u{2022} ID {}",
            format_readable_date(&topic.added_at),
            topic.id
        ),
        Color::DIM,
        use_color,
    ));

    let [hard, normal, easy] = preview_intervals(topic.interval);
    lines.push(format!(
        "Review: {} {}  {} {}  {} {}",
        paint(Rating::Hard.label(), Color::RED, use_color),
        format_interval(hard),
        paint(Rating::Normal.label(), Color::YELLOW, use_color),
        format_interval(normal),
        paint(Rating::Easy.label(), Color::GREEN, use_color),
        format_interval(easy),
    ));

    if !topic.history.is_empty() {
        lines.push(String::new());
        lines.push(format!("History ({} reviews):", topic.review_count()));
        for entry in &topic.history {
            lines.push(format!(
                "  {}  {}",
                entry.date.format("%Y-%m-%d %H:%M"),
                paint(entry.rating.as_str(), rating_color(entry.rating), use_color)
            ));
        }
    }

    lines
}

/// One row per topic: title, status, interval, next review
pub fn render_topic_table(topics: &[&Topic], use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let title_width = topics.iter().map(|t| t.title.chars().count()).max().unwrap_or(5).clamp(5, 40);
    let status_width = 9;
    let interval_width = 8;

    lines.push(format!("{:<8} {:<tw$} {:<sw$} {:<iw$} {}",
        "ID", "Title", "Status", "Interval", "Next review",
        tw = title_width, sw = status_width, iw = interval_width));
    lines.push(format!("{} {} {} {} {}",
        "\u{2500}".repeat(8),
        "\u{2500}".repeat(title_width),
        "\u{2500}".repeat(status_width),
        "\u{2500}".repeat(interval_width),
        "\u{2500}".repeat(11)));

    for topic in topics {
        let title = truncate(&topic.title, title_width);

        let (status, color) = match topic.status() {
            TopicStatus::Due => ("due", Color::YELLOW),
            TopicStatus::Scheduled => ("scheduled", Color::CYAN),
        };
        // Pad before painting so escape codes don't skew the columns
        let status = paint(&format!("{:<sw$}", status, sw = status_width), color, use_color);

        let short_id: String = topic.id.to_string().chars().take(8).collect();

        lines.push(format!("{:<8} {:<tw$} {} {:<iw$} {}",
            short_id, title, status, format_interval(topic.interval),
            format_relative_date(&topic.next_review),
            tw = title_width, iw = interval_width));
    }

    lines
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_without_color_has_no_escapes() {
        let mut topic = Topic::new("user-1", "Send and Sync", Some("auto traits".to_string()));
        topic.interval = 3;
        let card = render_topic_card(&topic, false).join("\n");

        assert!(card.starts_with("Send and Sync"));
        assert!(card.contains("auto traits"));
        assert!(card.contains("Interval: 3 days"));
        assert!(!card.contains('\x1b'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long topic title", 10), "a very ...");
    }

    #[test]
    fn test_pluralize_days() {
        assert_eq!(pluralize_days(1), "1 day");
        assert_eq!(pluralize_days(2), "2 days");
    }
}
