use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// DeliveryEvent — one ball bowled, flattened from a nested match record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeliveryEvent {
    pub match_id: String,
    /// First listed match date, as found in the source (ISO 8601 expected).
    pub date: String,
    pub season: String,
    pub venue: String,
    pub batting_team: String,
    pub bowling_team: String,
    pub over: u32,
    pub batter: String,
    pub bowler: String,
    pub non_striker: String,
    pub runs_batter: u32,
    pub extras: u32,
    pub total_runs: u32,
    pub wides: u32,
    pub noballs: u32,
    pub legbyes: u32,
    pub byes: u32,
    /// Number of wickets recorded on this delivery. Detail fields below
    /// come from the first entry only.
    pub wickets: u32,
    pub wicket_kind: String,
    pub player_out: String,
    /// First credited fielder, or empty if the wicket carries none.
    pub fielder: String,
}

// ---------------------------------------------------------------------------
// Query output shapes
// ---------------------------------------------------------------------------

/// One player's batting in one match. Derived per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPlayerSummary {
    pub match_id: String,
    /// Bowling side faced, shortened via the acronym table for display.
    pub opponent: String,
    pub date: NaiveDate,
    pub venue: String,
    pub runs: u32,
    pub balls_faced: u32,
    /// runs / balls × 100, 2 decimal places; 0 when no balls were faced.
    pub strike_rate: f64,
}

/// Season-wide reduction over a player's match summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeasonTotals {
    pub total_runs: u32,
    pub overall_strike_rate: f64,
}

/// Everything the presentation layer needs for one (player, season) query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerReport {
    /// Per-match rows, ordered by date ascending.
    pub matches: Vec<MatchPlayerSummary>,
    pub totals: SeasonTotals,
}

impl PlayerReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
