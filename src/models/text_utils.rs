//! Text and timestamp helpers shared by the models and the views.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters not allowed in an uploaded file name.
static UNSAFE_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.-]").expect("Invalid file name regex"));

/// Runs of characters that separate slug words.
static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex"));

/// Trailing zone designator: `Z` or `+hh:mm` / `-hh:mm`.
static HAS_ZONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([zZ]|[+-]\d{2}:?\d{2})$").expect("Invalid zone regex"));

/// Dates are shown in Philippine time (UTC+8, no daylight saving).
const DISPLAY_OFFSET_SECS: i32 = 8 * 3600;

/// Words per minute used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Longest slug generated from a title.
const MAX_SLUG_LEN: usize = 80;

/// Bring a store timestamp into RFC 3339 form.
///
/// The store may return `2024-01-02 03:04:05` with a space separator and no
/// zone; such values are taken to be UTC.
pub fn normalize_timestamp(value: &str) -> String {
    let value = value.trim();
    let iso = if value.contains('T') {
        value.to_string()
    } else {
        value.replacen(' ', "T", 1)
    };
    if HAS_ZONE.is_match(&iso) {
        iso
    } else {
        format!("{}Z", iso)
    }
}

/// Parse a store timestamp leniently.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let normalized = normalize_timestamp(value);
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current date in the display time zone.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&display_offset()).date_naive()
}

/// `Jan 2, 2024 • 11:04 AM`, or the raw value when unparseable.
pub fn format_date_time(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt
            .with_timezone(&display_offset())
            .format("%b %-d, %Y • %-I:%M %p")
            .to_string(),
        None => value.to_string(),
    }
}

/// `January 2, 2024`, or the raw value when unparseable.
pub fn format_long_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt
            .with_timezone(&display_offset())
            .format("%B %-d, %Y")
            .to_string(),
        None => value.to_string(),
    }
}

/// `Jan 2, 2024`, or the raw value when unparseable.
pub fn format_short_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt
            .with_timezone(&display_offset())
            .format("%b %-d, %Y")
            .to_string(),
        None => value.to_string(),
    }
}

/// First `max` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Part of an email address before the `@`.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Whitespace-separated, non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `text`: `max(1, ceil(words / 200))`.
pub fn reading_time(text: &str) -> u32 {
    let words = word_count(text);
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Replace every character outside `[a-zA-Z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(name, "_").into_owned()
}

/// URL slug for a title: lowercase ASCII words joined by `-`.
///
/// Titles with no usable characters fall back to `post`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = SLUG_SEPARATORS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    let slug: String = slug.chars().take(MAX_SLUG_LEN).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "post".to_string()
    } else {
        slug.to_string()
    }
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_normalize_space_separated() {
        assert_eq!(
            normalize_timestamp("2024-01-02 03:04:05"),
            "2024-01-02T03:04:05Z"
        );
    }

    #[test]
    fn test_normalize_keeps_zone() {
        assert_eq!(
            normalize_timestamp("2024-01-02T03:04:05+00:00"),
            "2024-01-02T03:04:05+00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-01-02T03:04:05.123Z"),
            "2024-01-02T03:04:05.123Z"
        );
    }

    #[test]
    fn test_parse_fractional_postgres_timestamp() {
        let dt = parse_timestamp("2024-03-10 14:30:00.123456").unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.day(), 10);
    }

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_timestamp("1990-05-17").unwrap();
        assert_eq!(dt.year(), 1990);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_format_shifts_to_display_offset() {
        assert_eq!(
            format_date_time("2024-01-02T03:04:05Z"),
            "Jan 2, 2024 • 11:04 AM"
        );
        assert_eq!(format_long_date("2024-01-31T20:00:00Z"), "February 1, 2024");
    }

    #[test]
    fn test_format_unparseable_passes_through() {
        assert_eq!(format_short_date("n/a"), "n/a");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("one two three"), 1);
        assert_eq!(reading_time(&"word ".repeat(200)), 1);
        assert_eq!(reading_time(&"word ".repeat(201)), 2);
        assert_eq!(reading_time(&"  spaced\n\tout  ".repeat(450)), 5);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_file_name("ok-name.v2.jpg"), "ok-name.v2.jpg");
        assert_eq!(sanitize_file_name("café.png"), "caf_.png");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust & Tokio: 2024  "), "rust-tokio-2024");
        assert_eq!(slugify("!!!"), "post");
        assert!(slugify(&"long title ".repeat(20)).len() <= 80);
        assert!(!slugify(&"long title ".repeat(20)).ends_with('-'));
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("ada@example.com"), "ada");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
