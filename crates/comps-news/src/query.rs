//! Query and date-window construction for expansion-article searches.

use chrono::{Days, NaiveDate};

/// Terms OR-ed with the brand name to surface expansion coverage.
pub const EXPANSION_KEYWORDS: &[&str] = &["opens", "expands", "raises"];

/// Builds the disjunctive search query: `<brand> OR opens OR expands OR raises`.
#[must_use]
pub fn expansion_query(brand: &str) -> String {
    std::iter::once(brand.trim())
        .chain(EXPANSION_KEYWORDS.iter().copied())
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Inclusive date range sent as `from`/`to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SearchWindow {
    /// `from` in `YYYY-MM-DD`.
    #[must_use]
    pub fn from_param(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// `to` in `YYYY-MM-DD`.
    #[must_use]
    pub fn to_param(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

/// The trailing window of `days` days ending on `today`.
#[must_use]
pub fn search_window(today: NaiveDate, days: u32) -> SearchWindow {
    let from = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    SearchWindow { from, to: today }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn query_joins_brand_and_keywords() {
        assert_eq!(
            expansion_query("Sweetgreen"),
            "Sweetgreen OR opens OR expands OR raises"
        );
    }

    #[test]
    fn query_trims_brand() {
        assert_eq!(
            expansion_query("  Joe's Pizza "),
            "Joe's Pizza OR opens OR expands OR raises"
        );
    }

    #[test]
    fn window_spans_thirty_days() {
        let w = search_window(date(2025, 4, 8), 30);
        assert_eq!(w.from_param(), "2025-03-09");
        assert_eq!(w.to_param(), "2025-04-08");
    }

    #[test]
    fn window_crosses_year_boundary() {
        let w = search_window(date(2025, 1, 10), 30);
        assert_eq!(w.from_param(), "2024-12-11");
    }

    #[test]
    fn zero_day_window_is_today_only() {
        let w = search_window(date(2025, 6, 1), 0);
        assert_eq!(w.from, w.to);
    }
}
