//! Display formatting for server timestamps.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

/// Format a `created_at` value as `M/D/YYYY`.
///
/// Only the leading `YYYY-MM-DD` is read, so the calendar date the server
/// recorded is shown regardless of the viewer's time zone. Values that do not
/// start with a date are returned unchanged.
pub fn format_date(raw: &str) -> String {
    parse_ymd(raw).map_or_else(|| raw.to_owned(), |(y, m, d)| format!("{m}/{d}/{y}"))
}

fn parse_ymd(raw: &str) -> Option<(u32, u32, u32)> {
    let date = raw.get(..10)?;
    let well_formed = date
        .bytes()
        .enumerate()
        .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return None;
    }
    let (Ok(year), Ok(month), Ok(day)) = (
        date[..4].parse::<u32>(),
        date[5..7].parse::<u32>(),
        date[8..].parse::<u32>(),
    ) else {
        return None;
    };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}
