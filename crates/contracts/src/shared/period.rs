use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A resolved reporting window plus the equal-length window immediately
/// before it, used for percentage-change metrics.
///
/// Both windows are inclusive calendar-date ranges. When comparing against
/// stored timestamps the boundaries are expanded to full days
/// (00:00:00 .. 23:59:59) via the `*_bound` helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    /// Normalized label: "7days" | "30days" | "90days" | "year" | "custom"
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub previous_start: NaiveDate,
    pub previous_end: NaiveDate,
    /// Calendar days in the window, both endpoints included
    pub days: i64,
}

impl ResolvedPeriod {
    /// Resolve a user-supplied period against today's date.
    ///
    /// Explicit start+end win over the token and are normalized, never
    /// rejected: an inverted range is swapped. Without explicit dates the
    /// token maps to a day count, and anything unrecognized (including a
    /// missing or blank token) falls back to 30 days by design.
    pub fn resolve(
        token: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self::resolve_at(token, start_date, end_date, Utc::now().date_naive())
    }

    /// Same as [`resolve`](Self::resolve) with an injected "today".
    pub fn resolve_at(
        token: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        if let (Some(s), Some(e)) = (start_date, end_date) {
            let (start, end) = if e < s { (e, s) } else { (s, e) };
            let days = (end - start).num_days() + 1;
            return Self::build("custom", start, end, days);
        }

        let days: i64 = match token.map(str::trim).unwrap_or("") {
            "7days" => 7,
            "90days" => 90,
            "year" => 365,
            _ => 30,
        };
        let label = match days {
            7 => "7days",
            90 => "90days",
            365 => "year",
            _ => "30days",
        };
        let end = today;
        let start = end - Duration::days(days - 1);
        Self::build(label, start, end, days)
    }

    fn build(label: &str, start: NaiveDate, end: NaiveDate, days: i64) -> Self {
        let previous_end = start - Duration::days(1);
        let previous_start = previous_end - Duration::days(days - 1);
        Self {
            label: label.to_string(),
            start,
            end,
            previous_start,
            previous_end,
            days,
        }
    }

    /// "YYYY-MM-DD 00:00:00" lower bound of the current window
    pub fn start_bound(&self) -> String {
        day_start(self.start)
    }

    /// "YYYY-MM-DD 23:59:59" upper bound of the current window
    pub fn end_bound(&self) -> String {
        day_end(self.end)
    }

    pub fn previous_start_bound(&self) -> String {
        day_start(self.previous_start)
    }

    pub fn previous_end_bound(&self) -> String {
        day_end(self.previous_end)
    }
}

fn day_start(date: NaiveDate) -> String {
    format!("{} 00:00:00", date.format("%Y-%m-%d"))
}

fn day_end(date: NaiveDate) -> String {
    format!("{} 23:59:59", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn token_maps_to_day_count() {
        let today = date(2025, 6, 30);
        let p = ResolvedPeriod::resolve_at(Some("7days"), None, None, today);
        assert_eq!(p.days, 7);
        assert_eq!(p.start, date(2025, 6, 24));
        assert_eq!(p.end, today);

        let p = ResolvedPeriod::resolve_at(Some("year"), None, None, today);
        assert_eq!(p.days, 365);
    }

    #[test]
    fn unrecognized_token_falls_back_to_30_days() {
        let today = date(2025, 6, 30);
        for token in [None, Some(""), Some("  "), Some("quarter"), Some("7 days")] {
            let p = ResolvedPeriod::resolve_at(token, None, None, today);
            assert_eq!(p.days, 30, "token {:?}", token);
            assert_eq!(p.label, "30days");
            assert_eq!(p.start, date(2025, 6, 1));
        }
    }

    #[test]
    fn previous_window_is_adjacent_and_same_length() {
        let today = date(2025, 6, 30);
        let p = ResolvedPeriod::resolve_at(Some("7days"), None, None, today);
        assert_eq!(p.previous_end, date(2025, 6, 23));
        assert_eq!(p.previous_start, date(2025, 6, 17));
        assert_eq!(
            (p.previous_end - p.previous_start).num_days(),
            (p.end - p.start).num_days()
        );
    }

    #[test]
    fn explicit_dates_win_over_token() {
        let p = ResolvedPeriod::resolve_at(
            Some("7days"),
            Some(date(2025, 1, 1)),
            Some(date(2025, 1, 10)),
            date(2025, 6, 30),
        );
        assert_eq!(p.label, "custom");
        assert_eq!(p.days, 10);
        assert_eq!(p.previous_end, date(2024, 12, 31));
        assert_eq!(p.previous_start, date(2024, 12, 22));
    }

    #[test]
    fn inverted_explicit_range_is_swapped() {
        let p = ResolvedPeriod::resolve_at(
            None,
            Some(date(2025, 3, 20)),
            Some(date(2025, 3, 1)),
            date(2025, 6, 30),
        );
        assert_eq!(p.start, date(2025, 3, 1));
        assert_eq!(p.end, date(2025, 3, 20));
        assert_eq!(p.days, 20);
    }

    #[test]
    fn bounds_cover_full_days() {
        let p = ResolvedPeriod::resolve_at(Some("7days"), None, None, date(2025, 6, 30));
        assert_eq!(p.start_bound(), "2025-06-24 00:00:00");
        assert_eq!(p.end_bound(), "2025-06-30 23:59:59");
        assert_eq!(p.previous_end_bound(), "2025-06-23 23:59:59");
    }

    #[test]
    fn window_crosses_month_and_year_boundaries() {
        let p = ResolvedPeriod::resolve_at(Some("30days"), None, None, date(2025, 1, 15));
        assert_eq!(p.start, date(2024, 12, 17));
        assert_eq!(p.end, date(2025, 1, 15));
    }
}
