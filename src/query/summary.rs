use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::config::team_acronym;
use crate::query::aggregator::AggRow;
use crate::types::{MatchPlayerSummary, PlayerReport, SeasonTotals};

/// runs / balls × 100, rounded to 2 decimal places. Zero balls faced is a
/// defined case (strike rate 0), never a division error.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    round2(runs as f64 / balls as f64 * 100.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug)]
struct MatchGroup {
    match_id: String,
    bowling_team: String,
    date: NaiveDate,
    venue: String,
    /// All rows in a group share the broadcast total; first wins.
    runs: u32,
    /// Maximum of the running balls-faced column within the group.
    balls_faced: u32,
}

/// Reduce aggregated rows to one summary per match for the queried player,
/// plus season totals.
///
/// `player` is matched case-insensitively as a substring of the batter name.
/// An empty query, or one matching no rows, yields an empty report.
pub fn player_report(rows: &[AggRow<'_>], player: &str) -> PlayerReport {
    let needle = player.trim().to_lowercase();
    if needle.is_empty() {
        return PlayerReport::default();
    }

    // Group matching rows by (match, opponent, date, venue) in encounter
    // order. Rows without a parsed date cannot be placed on the timeline
    // and are left out (year-filtered input never contains them).
    let mut groups: Vec<MatchGroup> = Vec::new();
    let mut index: HashMap<(String, String, NaiveDate, String), usize> = HashMap::new();

    for agg in rows {
        let ev = &agg.row.event;
        if !ev.batter.to_lowercase().contains(&needle) {
            continue;
        }
        let Some(date) = agg.row.date else { continue };

        let key = (
            ev.match_id.clone(),
            ev.bowling_team.clone(),
            date,
            ev.venue.clone(),
        );
        match index.get(&key) {
            Some(&i) => {
                let g = &mut groups[i];
                g.balls_faced = g.balls_faced.max(agg.balls_faced);
            }
            None => {
                index.insert(key, groups.len());
                groups.push(MatchGroup {
                    match_id: ev.match_id.clone(),
                    bowling_team: ev.bowling_team.clone(),
                    date,
                    venue: ev.venue.clone(),
                    runs: agg.total_runs,
                    balls_faced: agg.balls_faced,
                });
            }
        }
    }

    // Guard against residual duplicate grouping keys for one match.
    let mut seen = HashSet::new();
    groups.retain(|g| seen.insert(g.match_id.clone()));

    groups.sort_by_key(|g| g.date);

    let total_runs: u32 = groups.iter().map(|g| g.runs).sum();
    let total_balls: u32 = groups.iter().map(|g| g.balls_faced).sum();

    let matches = groups
        .into_iter()
        .map(|g| MatchPlayerSummary {
            strike_rate: strike_rate(g.runs, g.balls_faced),
            opponent: team_acronym(&g.bowling_team).to_string(),
            match_id: g.match_id,
            date: g.date,
            venue: g.venue,
            runs: g.runs,
            balls_faced: g.balls_faced,
        })
        .collect();

    PlayerReport {
        matches,
        totals: SeasonTotals {
            total_runs,
            overall_strike_rate: strike_rate(total_runs, total_balls),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::aggregator::aggregate;
    use crate::state::EventTable;
    use crate::types::DeliveryEvent;

    fn ball(
        match_id: &str,
        date: &str,
        batter: &str,
        bowling_team: &str,
        runs: u32,
        wides: u32,
    ) -> DeliveryEvent {
        DeliveryEvent {
            match_id: match_id.to_string(),
            date: date.to_string(),
            batter: batter.to_string(),
            bowling_team: bowling_team.to_string(),
            venue: "V".to_string(),
            runs_batter: runs,
            wides,
            ..DeliveryEvent::default()
        }
    }

    fn report(events: Vec<DeliveryEvent>, player: &str) -> PlayerReport {
        let table = EventTable::build(events);
        let rows: Vec<_> = table.rows().iter().collect();
        let agg = aggregate(&rows);
        player_report(&agg, player)
    }

    fn kohli_fixture() -> Vec<DeliveryEvent> {
        vec![
            ball("m1", "2024-04-02", "Virat Kohli", "Kolkata Knight Riders", 4, 0),
            ball("m1", "2024-04-02", "Virat Kohli", "Kolkata Knight Riders", 1, 1),
            ball("m1", "2024-04-02", "PD Salt", "Royal Challengers Bengaluru", 6, 0),
            ball("m2", "2024-04-09", "Virat Kohli", "Unknown XI", 2, 0),
            ball("m2", "2024-04-09", "Virat Kohli", "Unknown XI", 3, 0),
        ]
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let a = report(kohli_fixture(), "kohli");
        let b = report(kohli_fixture(), "KOHLI");
        let c = report(kohli_fixture(), "Koh");
        assert_eq!(a.matches, b.matches);
        assert_eq!(b.matches, c.matches);
        assert_eq!(a.matches.len(), 2);
    }

    #[test]
    fn empty_query_yields_empty_report() {
        let r = report(kohli_fixture(), "  ");
        assert!(r.is_empty());
        assert_eq!(r.totals, SeasonTotals::default());
    }

    #[test]
    fn unmatched_player_yields_empty_report() {
        let r = report(kohli_fixture(), "Tendulkar");
        assert!(r.is_empty());
        assert_eq!(r.totals.total_runs, 0);
        assert_eq!(r.totals.overall_strike_rate, 0.0);
    }

    #[test]
    fn per_match_rows_use_first_runs_and_max_balls() {
        let r = report(kohli_fixture(), "Kohli");
        // m1: 5 runs off 1 valid ball (the wide does not count).
        let m1 = &r.matches[0];
        assert_eq!(m1.match_id, "m1");
        assert_eq!(m1.runs, 5);
        assert_eq!(m1.balls_faced, 1);
        assert_eq!(m1.strike_rate, 500.0);
        // m2: 5 runs off 2 balls.
        let m2 = &r.matches[1];
        assert_eq!(m2.runs, 5);
        assert_eq!(m2.balls_faced, 2);
        assert_eq!(m2.strike_rate, 250.0);
    }

    #[test]
    fn season_totals_sum_across_matches() {
        let r = report(kohli_fixture(), "Kohli");
        assert_eq!(r.totals.total_runs, 10);
        // 10 runs off 3 balls = 333.33.
        assert_eq!(r.totals.overall_strike_rate, 333.33);
    }

    #[test]
    fn opponents_map_to_acronyms_with_passthrough() {
        let r = report(kohli_fixture(), "Kohli");
        assert_eq!(r.matches[0].opponent, "KKR");
        assert_eq!(r.matches[1].opponent, "Unknown XI");
    }

    #[test]
    fn rows_ordered_by_date_ascending() {
        let r = report(
            vec![
                ball("m2", "2024-04-09", "A", "T", 1, 0),
                ball("m1", "2024-04-02", "A", "T", 1, 0),
            ],
            "A",
        );
        assert_eq!(r.matches[0].match_id, "m1");
        assert_eq!(r.matches[1].match_id, "m2");
    }

    #[test]
    fn duplicate_match_ids_are_deduplicated() {
        // Same match id under two venues; the residual-duplicate guard keeps
        // only the first group.
        let mut a = ball("m1", "2024-04-02", "A", "T", 2, 0);
        a.venue = "V1".to_string();
        let mut b = ball("m1", "2024-04-02", "A", "T", 2, 0);
        b.venue = "V2".to_string();
        let r = report(vec![a, b], "A");
        assert_eq!(r.matches.len(), 1);
        assert_eq!(r.matches[0].venue, "V1");
    }

    #[test]
    fn zero_balls_faced_has_zero_strike_rate() {
        let r = report(vec![ball("m1", "2024-04-02", "A", "T", 0, 1)], "A");
        assert_eq!(r.matches.len(), 1);
        assert_eq!(r.matches[0].balls_faced, 0);
        assert_eq!(r.matches[0].strike_rate, 0.0);
        assert_eq!(r.totals.overall_strike_rate, 0.0);
    }

    #[test]
    fn strike_rate_rounds_to_two_decimals() {
        assert_eq!(strike_rate(1, 3), 33.33);
        assert_eq!(strike_rate(2, 3), 66.67);
        assert_eq!(strike_rate(0, 0), 0.0);
        assert_eq!(strike_rate(5, 1), 500.0);
    }
}
