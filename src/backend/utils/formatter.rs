//! Display formatting for API values.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Formats a megabyte count as gigabytes with two decimals, rounding half up.
pub fn format_storage_gb(megabytes: f64) -> String {
    let megabytes = if megabytes.is_finite() { megabytes.max(0.0) } else { 0.0 };
    let gigabytes = (megabytes / 1024.0 * 100.0).round() / 100.0;
    format!("{gigabytes:.2} GB")
}

pub fn format_hours(hours: f64) -> String {
    let hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
    format!("{hours:.1} h")
}

/// Byte count for output file listings (`20 KB`, `1.5 MB`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if size < 10.0 && unit > 0 {
        format!("{size:.1} {}", UNITS[unit])
    } else {
        format!("{size:.0} {}", UNITS[unit])
    }
}

/// `data_import` -> `data import`.
pub fn humanize_job_type(job_type: &str) -> String {
    job_type.replace('_', " ")
}

/// Parses API timestamps.
///
/// The backend emits naive UTC timestamps (`2024-03-01T09:30:00.123456`);
/// RFC 3339 values with an offset are accepted too.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Short date (`3/1/2024`) in the given zone; unparseable input is shown as-is.
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(tz).format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Short date in the user's local time zone.
pub fn format_local_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

/// Date and time in the user's local time zone.
pub fn format_local_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(&Local).format("%-m/%-d/%Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_renders_in_gigabytes() {
        assert_eq!(format_storage_gb(2048.0), "2.00 GB");
        assert_eq!(format_storage_gb(100.0), "0.10 GB");
        assert_eq!(format_storage_gb(0.0), "0.00 GB");
    }

    #[test]
    fn storage_rounds_half_up() {
        // exactly 0.125 GB
        assert_eq!(format_storage_gb(128.0), "0.13 GB");
        assert_eq!(format_storage_gb(1536.0), "1.50 GB");
    }

    #[test]
    fn storage_clamps_garbage() {
        assert_eq!(format_storage_gb(-20.0), "0.00 GB");
        assert_eq!(format_storage_gb(f64::NAN), "0.00 GB");
    }

    #[test]
    fn file_sizes_pick_a_readable_unit() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(20480), "20 KB");
        assert_eq!(format_file_size(1536 * 1024), "1.5 MB");
    }

    #[test]
    fn job_types_lose_every_underscore() {
        assert_eq!(humanize_job_type("data_import"), "data import");
        assert_eq!(
            humanize_job_type("differential_expression_test"),
            "differential expression test"
        );
        assert_eq!(humanize_job_type("clustering"), "clustering");
    }

    #[test]
    fn naive_and_offset_timestamps_parse() {
        let naive = parse_timestamp("2024-03-01T09:30:00.123456").unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-03-01T09:30:00.123456+00:00");

        let offset = parse_timestamp("2024-03-01T11:30:00+02:00").unwrap();
        assert_eq!(offset, parse_timestamp("2024-03-01 09:30:00").unwrap());
    }

    #[test]
    fn dates_render_short_form() {
        assert_eq!(format_date_in("2024-03-01T09:30:00", &Utc), "3/1/2024");
        assert_eq!(format_date_in("2023-12-25T23:59:59Z", &Utc), "12/25/2023");
    }

    #[test]
    fn unparseable_date_is_passed_through() {
        assert_eq!(format_date_in("yesterday", &Utc), "yesterday");
    }

    #[test]
    fn hours_have_one_decimal() {
        assert_eq!(format_hours(12.345), "12.3 h");
        assert_eq!(format_hours(0.0), "0.0 h");
    }
}
