use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc, Weekday};

pub const DEFAULT_TZ_OFFSET: &str = "+05:30";

pub fn parse_tz_offset_or_default(raw: &str) -> FixedOffset {
    parse_tz_offset(raw).unwrap_or_else(|| {
        warn!(
            "Invalid MESS_TZ_OFFSET '{}', defaulting to {}",
            raw, DEFAULT_TZ_OFFSET
        );
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap_or_else(|| Utc.fix())
    })
}

pub fn parse_tz_offset(value: &str) -> Option<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sign = match trimmed.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let rest = &trimmed[1..];
    let mut parts = rest.split(':');
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = parts.next().unwrap_or("0").parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Calendar date on campus for a UTC instant.
pub fn campus_date(now: DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

pub fn parse_day(value: &str) -> Option<Weekday> {
    match value.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Index of the quote shown on `date`; rotates once per day of the year.
pub fn quote_index(date: NaiveDate, quote_count: usize) -> Option<usize> {
    if quote_count == 0 {
        return None;
    }
    Some(date.ordinal0() as usize % quote_count)
}

/// Leaderboard window in days, clamped to 1..=30.
pub fn clamp_window(days: Option<u32>) -> u32 {
    days.unwrap_or(7).clamp(1, 30)
}
