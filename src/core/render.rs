use crate::domain::model::{StreakStats, Theme};

pub const CARD_WIDTH: u32 = 495;
pub const CARD_HEIGHT: u32 = 195;

const CENTER_X: f32 = 247.5;

const FLAME_PATH: &str = "M10 2C11 2 12 3 12 4c0 1-1 2-2 3-1 1-2 0-2 0-1-1-2-2-2-3 0-1 1-2 2-2zm0 20c-1 0-2-1-2-2 0-1 1-2 2-2s2 1 2 2c0 1-1 2-2 2zM10 10c-2 0-4 2-4 4s2 4 4 4 4-2 4-4-2-4-4-4z";

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the streak card. Theme colors are expected to be validated already;
/// they are escaped anyway since they land inside attributes.
pub fn render_card(username: &str, stats: &StreakStats, theme: &Theme) -> String {
    let mut lines = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">"#,
            w = CARD_WIDTH,
            h = CARD_HEIGHT
        ),
        "  <defs>".to_string(),
        r#"    <linearGradient id="bgGrad" x1="0" y1="0" x2="0" y2="100%" gradientUnits="userSpaceOnUse">"#
            .to_string(),
        format!(
            r#"      <stop offset="0" stop-color="{}"/>"#,
            escape_xml(&theme.background_start)
        ),
        format!(
            r#"      <stop offset="1" stop-color="{}"/>"#,
            escape_xml(&theme.background_end)
        ),
        "    </linearGradient>".to_string(),
        "  </defs>".to_string(),
        r#"  <rect x="0" y="0" width="100%" height="100%" rx="10" ry="10" fill="url(#bgGrad)"/>"#
            .to_string(),
        format!(
            r#"  <text x="{}" y="35" fill="{}" font-family="sans-serif" font-size="24" font-weight="bold" text-anchor="middle">Contribution Streak</text>"#,
            CENTER_X,
            escape_xml(&theme.title)
        ),
        format!(
            r#"  <g transform="translate(30, 40) scale(1.8)" fill="{}"><path d="{}"/></g>"#,
            escape_xml(&theme.accent),
            FLAME_PATH
        ),
    ];

    let columns: [(String, &str, f32); 3] = [
        (stats.current_streak.to_string(), "Current Streak", 100.0),
        (stats.longest_streak.to_string(), "Longest Streak", CENTER_X),
        (stats.total_contributions.to_string(), "Contributions", 395.0),
    ];

    for (value, label, x) in &columns {
        lines.push(format!(
            r#"  <text x="{}" y="90" fill="{}" font-family="monospace" font-size="32" font-weight="bold" text-anchor="middle">{}</text>"#,
            x,
            escape_xml(&theme.value),
            value
        ));
        lines.push(format!(
            r#"  <text x="{}" y="120" fill="{}" font-family="sans-serif" font-size="14" text-anchor="middle">{}</text>"#,
            x,
            escape_xml(&theme.label),
            label
        ));
    }

    lines.push(format!(
        r#"  <text x="{}" y="170" fill="{}" font-family="sans-serif" font-size="14" text-anchor="middle">@{}</text>"#,
        CENTER_X,
        escape_xml(&theme.label),
        escape_xml(username)
    ));
    lines.push("</svg>".to_string());

    let mut svg = lines.join("\n");
    svg.push('\n');
    svg
}
