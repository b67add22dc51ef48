// Text formatting helpers shared by the table views and the auto-ping
// status. Everything here is pure so it can be unit tested without a
// terminal.

use chrono::{DateTime, Local, TimeZone};
use crossterm::style::Stylize;

/// Render a number of seconds as `1d 2h 3m 4s`, skipping zero units.
/// Zero renders as `0s`.
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let mins = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (mins, "m"), (secs, "s")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if parts.is_empty() {
        "0s".into()
    } else {
        parts.join(" ")
    }
}

/// Same as [`format_duration`] for millisecond values coming from the API.
pub fn format_duration_ms(millis: i64) -> String {
    format_duration((millis.max(0) / 1000) as u64)
}

/// Group a number the way the dashboard does (`1.234.567,5`): dots between
/// thousands, a comma before at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if negative && (grouped != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Wall-clock time of day, used for ping timestamps.
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Local date and time for an epoch-millisecond value, `N/A` if the
/// value cannot be represented.
pub fn format_timestamp_ms(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(at) => at.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => "N/A".into(),
    }
}

/// Local date only.
pub fn format_date_ms(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(at) => at.format("%d/%m/%Y").to_string(),
        None => "N/A".into(),
    }
}

/// Piece of an announcement body after parsing its small markdown subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    Text(&'a str),
    Link { text: &'a str, url: &'a str },
    Bold(&'a str),
    Italic(&'a str),
}

/// Split an announcement body into spans. Supports `[text](url)`,
/// `**bold**` and `*italic*`; anything else stays plain text.
pub fn markdown_spans(content: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = content;
    let mut plain_start = 0usize;
    let mut pos = 0usize;

    while let Some(ch) = rest.chars().next() {
        let parsed = if ch == '[' {
            split_link(rest).map(|(text, url, tail)| (Span::Link { text, url }, tail))
        } else if let Some(tail) = rest.strip_prefix("**") {
            tail.find("**")
                .filter(|end| *end > 0)
                .map(|end| (Span::Bold(&tail[..end]), &tail[end + 2..]))
        } else if let Some(tail) = rest.strip_prefix('*') {
            tail.find('*')
                .filter(|end| *end > 0 && !tail[..*end].starts_with(' '))
                .map(|end| (Span::Italic(&tail[..end]), &tail[end + 1..]))
        } else {
            None
        };

        match parsed {
            Some((span, tail)) => {
                if plain_start < pos {
                    spans.push(Span::Text(&content[plain_start..pos]));
                }
                spans.push(span);
                pos = content.len() - tail.len();
                plain_start = pos;
                rest = tail;
            }
            None => {
                pos += ch.len_utf8();
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    if plain_start < content.len() {
        spans.push(Span::Text(&content[plain_start..]));
    }
    spans
}

/// Render an announcement body for the terminal.
pub fn render_markdown(content: &str) -> String {
    markdown_spans(content)
        .into_iter()
        .map(|span| match span {
            Span::Text(text) => text.to_string(),
            Span::Link { text, url } => {
                format!("{}{}", text.blue(), format!(" ({})", url).dark_grey())
            }
            Span::Bold(text) => text.bold().to_string(),
            Span::Italic(text) => text.italic().to_string(),
        })
        .collect()
}

/// Parse `[text](url)` at the start of `input`.
fn split_link(input: &str) -> Option<(&str, &str, &str)> {
    let close = input.find(']')?;
    let text = &input[1..close];
    if text.is_empty() || text.contains('[') {
        return None;
    }
    let after = input[close + 1..].strip_prefix('(')?;
    let end = after.find(')')?;
    let url = &after[..end];
    if url.is_empty() {
        return None;
    }
    Some((text, url, &after[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_skips_zero_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3661), "1h 1m 1s");
        assert_eq!(format_duration(86400), "1d");
        assert_eq!(format_duration(90061), "1d 1h 1m 1s");
        assert_eq!(format_duration(86400 + 5), "1d 5s");
    }

    #[test]
    fn duration_is_zero_only_for_zero() {
        for s in [1u64, 7, 61, 3599, 86399, 1_000_000] {
            assert_ne!(format_duration(s), "0s", "{} seconds", s);
        }
    }

    #[test]
    fn duration_from_millis_truncates_and_clamps() {
        assert_eq!(format_duration_ms(1999), "1s");
        assert_eq!(format_duration_ms(-5000), "0s");
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1.000");
        assert_eq!(format_number(1234567.0), "1.234.567");
        assert_eq!(format_number(1234.5), "1.234,5");
        assert_eq!(format_number(0.12345), "0,123");
        assert_eq!(format_number(-2500.0), "-2.500");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(format_timestamp_ms(i64::MAX), "N/A");
        assert_eq!(format_timestamp_ms(0).len(), "01/01/1970 00:00:00".len());
    }

    #[test]
    fn markdown_spans_cover_links_and_emphasis() {
        assert_eq!(markdown_spans("plain text"), vec![Span::Text("plain text")]);
        assert_eq!(
            markdown_spans("see [docs](https://x.io) now"),
            vec![
                Span::Text("see "),
                Span::Link { text: "docs", url: "https://x.io" },
                Span::Text(" now"),
            ]
        );
        assert_eq!(
            markdown_spans("**hi** and *there*"),
            vec![Span::Bold("hi"), Span::Text(" and "), Span::Italic("there")]
        );
    }

    #[test]
    fn markdown_leaves_unmatched_markers_alone() {
        assert_eq!(markdown_spans("a * b"), vec![Span::Text("a * b")]);
        assert_eq!(markdown_spans("[broken"), vec![Span::Text("[broken")]);
        assert_eq!(markdown_spans("[x]()"), vec![Span::Text("[x]()")]);
        assert!(markdown_spans("").is_empty());
    }
}
