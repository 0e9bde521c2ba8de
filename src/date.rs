//! Calendar arithmetic and display formatting
//!
//! Every day-boundary decision in the crate goes through this module:
//! truncating a moment to its calendar day in a given zone, adding whole
//! calendar days, and rendering dates relative to "now".

use std::fmt::Display;

use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDate, TimeZone, Utc};

/// Calendar day of `moment` as seen from the zone `tz`
pub fn day_in<Tz: TimeZone>(moment: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    moment.with_timezone(tz).date_naive()
}

/// Calendar day of `moment` in the local zone
pub fn local_day(moment: &DateTime<Utc>) -> NaiveDate {
    day_in(moment, &Local)
}

/// Add whole calendar days, keeping the wall-clock time of day.
///
/// When the wall-clock time does not exist (or is ambiguous) on the target
/// day because of a DST transition, falls back to adding `days * 24h`.
/// Results past the representable range clamp to `DateTime::<Utc>::MAX_UTC`.
pub fn add_days<Tz: TimeZone>(moment: &DateTime<Tz>, days: u32) -> DateTime<Tz> {
    if let Some(shifted) = moment.clone().checked_add_days(Days::new(u64::from(days))) {
        return shifted;
    }

    Duration::try_days(i64::from(days))
        .and_then(|delta| moment.clone().checked_add_signed(delta))
        .unwrap_or_else(|| {
            log::debug!("{} days past {:?} is out of range, clamping", days, moment.naive_utc());
            DateTime::<Utc>::MAX_UTC.with_timezone(&moment.timezone())
        })
}

/// Number of calendar days from `from` to `to` (negative when `to` is earlier)
pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Format a date as "Today", "Tomorrow", or a relative phrase such as
/// "Monday at 9:30 AM"
pub fn format_relative_date(date: &DateTime<Utc>) -> String {
    format_relative_date_at(date, &Local::now())
}

pub fn format_relative_date_at<Tz>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let tz = now.timezone();
    let target = date.with_timezone(&tz);
    let diff = calendar_days_between(now.date_naive(), target.date_naive());

    let time = target.format("%-I:%M %p");
    let weekday = target.format("%A");

    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => format!("Yesterday at {}", time),
        -6..=-2 => format!("Last {} at {}", weekday, time),
        2..=6 => format!("{} at {}", weekday, time),
        _ => target.format("%m/%d/%Y").to_string(),
    }
}

/// Format the distance between now and `date`, e.g. "in 3 days" or "2 hours ago"
pub fn format_date_distance(date: &DateTime<Utc>) -> String {
    format_date_distance_at(date, &Utc::now())
}

pub fn format_date_distance_at(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*date - *now).num_seconds();
    let phrase = distance_phrase(seconds.unsigned_abs());

    if seconds >= 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_MONTH: f64 = 43200.0;
const MINUTES_IN_TWO_MONTHS: f64 = 86400.0;

fn distance_phrase(seconds: u64) -> String {
    let minutes = (seconds as f64 / 60.0).round();

    if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes < 2.0 {
        "1 minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes as u64)
    } else if minutes < 90.0 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {} hours", (minutes / 60.0).round() as u64)
    } else if minutes < 2520.0 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        format!("{} days", (minutes / MINUTES_IN_DAY).round() as u64)
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes / MINUTES_IN_MONTH).round() as u64;
        if months <= 1 {
            "about 1 month".to_string()
        } else {
            format!("about {} months", months)
        }
    } else {
        let months = (minutes / MINUTES_IN_MONTH).floor() as u64;
        if months < 12 {
            return format!("{} months", months);
        }

        let years = months / 12;
        let remainder = months % 12;
        let plural = |n: u64| if n == 1 { "year" } else { "years" };
        if remainder < 3 {
            format!("about {} {}", years, plural(years))
        } else if remainder < 9 {
            format!("over {} {}", years, plural(years))
        } else {
            format!("almost {} {}", years + 1, plural(years + 1))
        }
    }
}

/// Format a date like "October 19, 2026" (local zone)
pub fn format_readable_date(date: &DateTime<Utc>) -> String {
    format_readable_date_in(date, &Local)
}

pub fn format_readable_date_in<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = date.with_timezone(tz);
    format!("{} {}, {}", local.format("%B"), local.day(), local.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::New_York;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_add_days_across_month_boundary() {
        let start = at(2025, 1, 30, 14, 15, 0);
        let result = add_days(&start, 2);
        assert_eq!(result, at(2025, 2, 1, 14, 15, 0));
    }

    #[test]
    fn test_add_days_across_year_and_leap_day() {
        assert_eq!(add_days(&at(2025, 12, 31, 8, 0, 0), 1), at(2026, 1, 1, 8, 0, 0));
        assert_eq!(add_days(&at(2024, 2, 28, 8, 0, 0), 1), at(2024, 2, 29, 8, 0, 0));
    }

    #[test]
    fn test_add_days_clamps_past_representable_range() {
        let start = at(2026, 10, 19, 9, 30, 0);
        assert_eq!(add_days(&start, u32::MAX), DateTime::<Utc>::MAX_UTC);

        let east = chrono::FixedOffset::east_opt(3 * 3600).unwrap();
        let zoned = add_days(&start.with_timezone(&east), u32::MAX);
        assert_eq!(zoned.with_timezone(&Utc), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_add_days_keeps_wall_clock_across_dst_change() {
        // 2026-03-08 is the spring-forward day in New York: only 23 hours pass
        let start = New_York.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        let result = add_days(&start, 1);
        assert_eq!(result, New_York.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap());
        assert_eq!((result - start).num_hours(), 23);
    }

    #[test]
    fn test_add_days_into_spring_forward_gap() {
        // 02:30 does not exist on 2026-03-08 in New York; 24 hours later is 03:30 EDT
        let start = New_York.with_ymd_and_hms(2026, 3, 7, 2, 30, 0).unwrap();
        let result = add_days(&start, 1);

        assert_eq!(result.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
        assert_eq!((result.hour(), result.minute()), (3, 30));
        assert_eq!(result - start, Duration::hours(24));
    }

    #[test]
    fn test_add_days_into_fall_back_ambiguity() {
        // 01:30 happens twice on 2026-11-01 in New York
        let start = New_York.with_ymd_and_hms(2026, 10, 31, 1, 30, 0).unwrap();
        let result = add_days(&start, 1);

        assert_eq!(result.date_naive(), NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        assert_eq!((result.hour(), result.minute()), (1, 30));
        assert_eq!(result - start, Duration::hours(24));
    }

    #[test]
    fn test_day_in_respects_zone() {
        let moment = at(2026, 3, 10, 23, 30, 0);
        let east = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(day_in(&moment, &Utc), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(day_in(&moment, &east), NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
    }

    #[test]
    fn test_format_relative_date() {
        let now = at(2026, 10, 19, 10, 0, 0); // a Monday
        assert_eq!(format_relative_date_at(&at(2026, 10, 19, 23, 0, 0), &now), "Today");
        assert_eq!(format_relative_date_at(&at(2026, 10, 20, 0, 0, 0), &now), "Tomorrow");
        assert_eq!(
            format_relative_date_at(&at(2026, 10, 18, 9, 5, 0), &now),
            "Yesterday at 9:05 AM"
        );
        assert_eq!(
            format_relative_date_at(&at(2026, 10, 22, 15, 30, 0), &now),
            "Thursday at 3:30 PM"
        );
        assert_eq!(
            format_relative_date_at(&at(2026, 10, 14, 15, 30, 0), &now),
            "Last Wednesday at 3:30 PM"
        );
        assert_eq!(format_relative_date_at(&at(2026, 11, 2, 8, 0, 0), &now), "11/02/2026");
    }

    #[test]
    fn test_format_date_distance() {
        let now = at(2026, 10, 19, 10, 0, 0);
        assert_eq!(format_date_distance_at(&now, &now), "in less than a minute");
        assert_eq!(format_date_distance_at(&at(2026, 10, 19, 10, 20, 0), &now), "in 20 minutes");
        assert_eq!(format_date_distance_at(&at(2026, 10, 19, 13, 0, 0), &now), "in about 3 hours");
        assert_eq!(format_date_distance_at(&at(2026, 10, 20, 10, 0, 0), &now), "in 1 day");
        assert_eq!(format_date_distance_at(&at(2026, 10, 25, 10, 0, 0), &now), "in 6 days");
        assert_eq!(format_date_distance_at(&at(2026, 10, 17, 10, 0, 0), &now), "2 days ago");
        assert_eq!(format_date_distance_at(&at(2026, 11, 25, 10, 0, 0), &now), "in about 1 month");
        assert_eq!(format_date_distance_at(&at(2027, 10, 25, 10, 0, 0), &now), "in about 1 year");
    }

    #[test]
    fn test_format_readable_date() {
        assert_eq!(
            format_readable_date_in(&at(2026, 10, 9, 12, 0, 0), &Utc),
            "October 9, 2026"
        );
    }
}
