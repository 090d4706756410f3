pub mod aggregator;
pub mod summary;

pub use aggregator::{aggregate, AggRow};
pub use summary::{player_report, strike_rate};

use crate::state::EventTable;
use crate::types::PlayerReport;

/// One-shot (year, player) query against the table: filter, aggregate,
/// reduce. The composition every consumer wants.
pub fn run_query(table: &EventTable, year: i32, player: &str) -> PlayerReport {
    let rows = table.year_rows(year);
    let agg = aggregate(&rows);
    player_report(&agg, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeliveryEvent;

    #[test]
    fn year_filter_restricts_results() {
        let mk = |match_id: &str, date: &str| DeliveryEvent {
            match_id: match_id.to_string(),
            date: date.to_string(),
            batter: "A".to_string(),
            bowling_team: "T".to_string(),
            runs_batter: 1,
            ..DeliveryEvent::default()
        };
        let table = EventTable::build(vec![mk("m1", "2023-04-01"), mk("m2", "2024-05-01")]);

        let r = run_query(&table, 2024, "A");
        assert_eq!(r.matches.len(), 1);
        assert_eq!(r.matches[0].match_id, "m2");

        let r = run_query(&table, 2023, "A");
        assert_eq!(r.matches[0].match_id, "m1");
    }
}
