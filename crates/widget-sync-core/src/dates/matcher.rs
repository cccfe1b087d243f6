use chrono::{Datelike, NaiveDate};

/// Parse `M/D/YYYY` (or zero-padded `MM/DD/YYYY`) into `(month, day, year)`.
///
/// Every component must be a positive integer and there must be exactly
/// three of them.
fn parse_param_components(date_str: &str) -> Option<(u32, u32, i32)> {
    let parts: Vec<&str> = date_str.split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return None;
    };

    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;

    if month == 0 || day == 0 || year <= 0 {
        return None;
    }

    Some((month, day, year))
}

/// Whether `date_str` names the same calendar day as `today`.
///
/// Absent or malformed input is "not today".
pub fn is_today(date_str: Option<&str>, today: NaiveDate) -> bool {
    let Some((month, day, year)) = date_str.and_then(parse_param_components) else {
        return false;
    };

    year == today.year() && month == today.month() && day == today.day()
}

/// Convert a picker value (`YYYY-MM-DD`) to parameter format (`M/D/YYYY`).
pub fn to_param_format(picker_value: &str) -> Option<String> {
    let parts: Vec<&str> = picker_value.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };

    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    Some(format!("{month}/{day}/{year}"))
}

/// Convert a parameter date (`M/D/YYYY`) to the picker's `YYYY-MM-DD` form.
pub fn to_picker_format(param_date: &str) -> Option<String> {
    let (month, day, year) = parse_param_components(param_date)?;
    Some(format!("{year}-{month:02}-{day:02}"))
}

/// Format a date as `M/D/YYYY` without leading zeros.
pub fn format_param_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
