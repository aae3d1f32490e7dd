/// Utilities for date formatting
///
/// Provides consistent date formatting across the application
use chrono::{Datelike, Duration, NaiveDate};

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// First and last day of the month containing `today`, as YYYY-MM-DD
pub fn month_range(today: NaiveDate) -> (String, String) {
    let start = today.with_day(1).unwrap_or(today);
    let next_month_start = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month_start
        .map(|d| d - Duration::days(1))
        .unwrap_or(today);
    (
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_month_range() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        assert_eq!(
            month_range(d),
            ("2024-02-01".to_string(), "2024-02-29".to_string())
        );
        let d = NaiveDate::from_ymd_opt(2023, 12, 5).unwrap();
        assert_eq!(
            month_range(d),
            ("2023-12-01".to_string(), "2023-12-31".to_string())
        );
    }
}
