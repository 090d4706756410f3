use std::collections::HashMap;

use crate::state::BallRow;

// ---------------------------------------------------------------------------
// Per-player running aggregates over a filtered view of the event table
// ---------------------------------------------------------------------------

/// One event row annotated with the running per-(match, batter) aggregates.
#[derive(Debug, Clone, Copy)]
pub struct AggRow<'a> {
    pub row: &'a BallRow,
    /// A ball counts toward balls faced unless it was a wide. Byes, leg
    /// byes and no-balls are still faced deliveries.
    pub valid_ball: bool,
    /// Running count of valid balls this batter has faced in this match,
    /// up to and including this row. The per-match figure is the maximum
    /// of this column within the match.
    pub balls_faced: u32,
    /// The batter's full runs total for this match, broadcast to every row.
    pub total_runs: u32,
}

/// Annotate `rows` (already filtered to one season/year, in delivery order)
/// with running balls-faced counts and broadcast per-match run totals.
pub fn aggregate<'a>(rows: &[&'a BallRow]) -> Vec<AggRow<'a>> {
    // Pass 1: per-(match, batter) run totals.
    let mut totals: HashMap<(&str, &str), u32> = HashMap::new();
    for row in rows {
        let key = (row.event.match_id.as_str(), row.event.batter.as_str());
        *totals.entry(key).or_insert(0) += row.event.runs_batter;
    }

    // Pass 2: running valid-ball counts in encounter order.
    let mut faced: HashMap<(&str, &str), u32> = HashMap::new();
    rows.iter()
        .map(|&row| {
            let key = (row.event.match_id.as_str(), row.event.batter.as_str());
            let valid_ball = row.event.wides == 0;
            let count = faced.entry(key).or_insert(0);
            if valid_ball {
                *count += 1;
            }
            AggRow {
                row,
                valid_ball,
                balls_faced: *count,
                total_runs: totals.get(&key).copied().unwrap_or(0),
            }
        })
        .collect()
}
