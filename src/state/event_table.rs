use chrono::{Datelike, NaiveDate};

use crate::types::DeliveryEvent;

// ---------------------------------------------------------------------------
// BallRow — one delivery plus its parsed calendar date
// ---------------------------------------------------------------------------

/// A delivery event with the match date parsed once at table-build time.
/// `date` is None for records whose date was missing or unparseable; such
/// rows never match a year filter instead of silently defaulting.
#[derive(Debug, Clone)]
pub struct BallRow {
    pub date: Option<NaiveDate>,
    pub event: DeliveryEvent,
}

// ---------------------------------------------------------------------------
// EventTable
// ---------------------------------------------------------------------------

/// The unified ball-by-ball table across all loaded matches.
///
/// Built once per data load and read-only afterwards; every query derives a
/// fresh filtered view. Row order preserves source delivery order within
/// each match, which downstream running aggregates depend on.
#[derive(Debug, Default)]
pub struct EventTable {
    rows: Vec<BallRow>,
}

impl EventTable {
    pub fn build(events: impl IntoIterator<Item = DeliveryEvent>) -> Self {
        let rows = events
            .into_iter()
            .map(|event| BallRow {
                date: NaiveDate::parse_from_str(&event.date, "%Y-%m-%d").ok(),
                event,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[BallRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years present in the table, newest first. Rows without a
    /// usable date contribute nothing.
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .rows
            .iter()
            .filter_map(|r| r.date.map(|d| d.year()))
            .collect();
        years.sort_unstable();
        years.dedup();
        years.reverse();
        years
    }

    /// Rows whose match date falls in `year`, in table order.
    pub fn year_rows(&self, year: i32) -> Vec<&BallRow> {
        self.rows
            .iter()
            .filter(|r| r.date.is_some_and(|d| d.year() == year))
            .collect()
    }

    /// Sorted distinct batter names appearing in `year`. Empty names are
    /// excluded; every other entry is a genuine text value by construction.
    pub fn players_in_year(&self, year: i32) -> Vec<String> {
        let mut players: Vec<String> = self
            .year_rows(year)
            .iter()
            .map(|r| r.event.batter.clone())
            .filter(|name| !name.is_empty())
            .collect();
        players.sort();
        players.dedup();
        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(match_id: &str, date: &str, batter: &str) -> DeliveryEvent {
        DeliveryEvent {
            match_id: match_id.to_string(),
            date: date.to_string(),
            batter: batter.to_string(),
            ..DeliveryEvent::default()
        }
    }

    #[test]
    fn years_are_distinct_and_descending() {
        let table = EventTable::build(vec![
            ev("m1", "2023-04-01", "A"),
            ev("m2", "2024-05-01", "B"),
            ev("m3", "2024-05-02", "C"),
            ev("m4", "2022-03-30", "D"),
        ]);
        assert_eq!(table.available_years(), vec![2024, 2023, 2022]);
    }

    #[test]
    fn unparseable_dates_are_excluded_from_year_queries() {
        let table = EventTable::build(vec![
            ev("m1", "", "A"),
            ev("m2", "not-a-date", "B"),
            ev("m3", "2024-05-01", "C"),
        ]);
        assert_eq!(table.available_years(), vec![2024]);
        assert_eq!(table.year_rows(2024).len(), 1);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn year_filter_selects_only_that_year() {
        let table = EventTable::build(vec![
            ev("m1", "2023-04-01", "A"),
            ev("m2", "2024-05-01", "A"),
        ]);
        let rows = table.year_rows(2024);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event.match_id, "m2");
    }

    #[test]
    fn players_are_sorted_distinct_and_non_empty() {
        let table = EventTable::build(vec![
            ev("m1", "2024-05-01", "V Kohli"),
            ev("m1", "2024-05-01", "PD Salt"),
            ev("m1", "2024-05-01", "V Kohli"),
            ev("m1", "2024-05-01", ""),
            ev("m2", "2023-04-01", "MS Dhoni"),
        ]);
        assert_eq!(table.players_in_year(2024), vec!["PD Salt", "V Kohli"]);
    }
}
