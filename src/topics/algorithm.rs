//! Review scheduling
//!
//! A piecewise multiplicative policy over whole days:
//! - Hard: reset to a fixed 2-day interval
//! - Normal: grow the interval by half (rounded, halves up)
//! - Easy: double the interval
//!
//! The next review lands on `now + interval` calendar days, keeping the
//! time of day of `now`.

use chrono::{DateTime, Local, TimeZone, Utc};

use super::models::Rating;
use crate::date;

/// Interval a hard review resets to
const HARD_INTERVAL: u32 = 2;

/// Result of calculating the next review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewResult {
    pub next_review: DateTime<Utc>,
    pub new_interval: u32,
}

/// New interval for a rating. `current_interval` must be >= 1.
pub fn next_interval(rating: Rating, current_interval: u32) -> u32 {
    match rating {
        Rating::Hard => HARD_INTERVAL,
        // round(i * 1.5) with halves rounded up
        Rating::Normal => current_interval.saturating_mul(3).saturating_add(1) / 2,
        Rating::Easy => current_interval.saturating_mul(2),
    }
}

/// Calculate the next review from the current wall-clock time
pub fn calculate_next_review(rating: Rating, current_interval: u32) -> ReviewResult {
    calculate_next_review_at(rating, current_interval, &Local::now())
}

/// Calculate the next review relative to `now`; calendar days are counted in
/// the zone of `now`
pub fn calculate_next_review_at<Tz: TimeZone>(
    rating: Rating,
    current_interval: u32,
    now: &DateTime<Tz>,
) -> ReviewResult {
    let new_interval = next_interval(rating, current_interval);
    let next_review = date::add_days(now, new_interval).with_timezone(&Utc);

    ReviewResult {
        next_review,
        new_interval,
    }
}

/// The default review ladder, in days
pub fn default_intervals() -> [u32; 5] {
    [1, 3, 7, 14, 30]
}

/// Review dates for a new topic following the default ladder
pub fn initial_schedule() -> Vec<DateTime<Utc>> {
    initial_schedule_at(&Local::now())
}

pub fn initial_schedule_at<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<DateTime<Utc>> {
    default_intervals()
        .iter()
        .map(|days| date::add_days(now, *days).with_timezone(&Utc))
        .collect()
}

/// Intervals each rating would produce: [hard, normal, easy]
pub fn preview_intervals(current_interval: u32) -> [u32; 3] {
    Rating::ALL.map(|rating| next_interval(rating, current_interval))
}

/// Format an interval in days to a compact string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_hard_resets_to_two_days() {
        for interval in [1, 2, 4, 30, 365] {
            assert_eq!(next_interval(Rating::Hard, interval), 2);
        }
    }

    #[test]
    fn test_normal_grows_by_half() {
        for interval in 1..=200u32 {
            let expected = (interval as f64 * 1.5).round() as u32;
            assert_eq!(next_interval(Rating::Normal, interval), expected, "interval {}", interval);
        }
    }

    #[test]
    fn test_easy_doubles() {
        for interval in 1..=200u32 {
            assert_eq!(next_interval(Rating::Easy, interval), interval * 2);
        }
    }

    #[test]
    fn test_interval_four_scenario() {
        let now = fixed_now();
        assert_eq!(calculate_next_review_at(Rating::Normal, 4, &now).new_interval, 6);
        assert_eq!(calculate_next_review_at(Rating::Easy, 4, &now).new_interval, 8);
        assert_eq!(calculate_next_review_at(Rating::Hard, 4, &now).new_interval, 2);
    }

    #[test]
    fn test_next_review_keeps_time_of_day() {
        let now = fixed_now();
        let result = calculate_next_review_at(Rating::Easy, 3, &now);
        assert_eq!(result.new_interval, 6);
        assert_eq!(result.next_review, Utc.with_ymd_and_hms(2026, 10, 25, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_next_review_across_month_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 1, 30, 18, 0, 0).unwrap();
        let result = calculate_next_review_at(Rating::Hard, 10, &now);
        assert_eq!(result.next_review, Utc.with_ymd_and_hms(2025, 2, 1, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_next_review_counts_days_in_zone_of_now() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 12, 31, 22, 0, 0).unwrap();
        let result = calculate_next_review_at(Rating::Hard, 1, &now);
        let local = result.next_review.with_timezone(&tz);
        assert_eq!(local, tz.with_ymd_and_hms(2026, 1, 2, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_repeated_easy_reviews_clamp_instead_of_overflowing() {
        let now = fixed_now();
        let mut interval = 1;
        let mut previous = now;

        for _ in 0..40 {
            let result = calculate_next_review_at(Rating::Easy, interval, &now);
            assert!(result.next_review >= previous);
            previous = result.next_review;
            interval = result.new_interval;
        }

        assert_eq!(interval, u32::MAX);
        assert_eq!(previous, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_initial_schedule() {
        let now = fixed_now();
        let schedule = initial_schedule_at(&now);
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[0], Utc.with_ymd_and_hms(2026, 10, 20, 9, 30, 0).unwrap());
        assert_eq!(schedule[4], Utc.with_ymd_and_hms(2026, 11, 18, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_preview_intervals() {
        assert_eq!(preview_intervals(1), [2, 2, 2]);
        assert_eq!(preview_intervals(5), [2, 8, 10]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
