use serde::Deserialize;

use crate::config::UNKNOWN_VENUE;
use crate::types::DeliveryEvent;

// ---------------------------------------------------------------------------
// Raw deserializable shapes
//
// Every field is optional (or defaulted) so that a structurally valid but
// sparse record still deserializes; the skip/default policy is applied once
// in `flatten_match`, not at every access site.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RawMatch {
    pub info: Option<RawInfo>,
    #[serde(default)]
    pub innings: Vec<RawInnings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawInfo {
    #[serde(default)]
    pub dates: Vec<String>,
    /// String ("2007/08") or number (2024) depending on source vintage.
    pub season: Option<serde_json::Value>,
    pub venue: Option<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    pub toss: Option<RawToss>,
}

impl RawInfo {
    /// An `info: {}` object carries no more signal than a missing one.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
            && self.season.is_none()
            && self.venue.is_none()
            && self.teams.is_empty()
            && self.toss.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct RawToss {
    pub winner: Option<String>,
    pub decision: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawInnings {
    pub team: Option<String>,
    #[serde(default)]
    pub overs: Vec<RawOver>,
}

#[derive(Debug, Deserialize)]
pub struct RawOver {
    #[serde(default)]
    pub over: u32,
    #[serde(default)]
    pub deliveries: Vec<RawDelivery>,
}

#[derive(Debug, Deserialize)]
pub struct RawDelivery {
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub non_striker: Option<String>,
    pub runs: Option<RawRuns>,
    /// Absent on the common case of a fair delivery with no extras.
    pub extras: Option<RawExtras>,
    #[serde(default)]
    pub wickets: Vec<RawWicket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRuns {
    #[serde(default)]
    pub batter: u32,
    #[serde(default)]
    pub extras: u32,
    #[serde(default)]
    pub total: u32,
}

/// Each field reads independently; a missing key means 0 of that extra.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExtras {
    #[serde(default)]
    pub wides: u32,
    #[serde(default)]
    pub noballs: u32,
    #[serde(default)]
    pub legbyes: u32,
    #[serde(default)]
    pub byes: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawWicket {
    pub kind: Option<String>,
    pub player_out: Option<String>,
    #[serde(default)]
    pub fielders: Vec<RawFielder>,
}

#[derive(Debug, Deserialize)]
pub struct RawFielder {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Skip — per-record rejection, logged and counted but never fatal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// `info` key absent, or present but an empty object.
    MissingInfo,
    /// Fewer than two teams listed; opponents cannot be derived.
    NotEnoughTeams,
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skip::MissingInfo => write!(f, "missing or empty info section"),
            Skip::NotEnoughTeams => write!(f, "fewer than two teams listed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Match header — per-match info fields that do not land on event rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MatchHeader {
    pub match_id: String,
    pub date: String,
    pub season: String,
    pub venue: String,
    pub teams: [String; 2],
    pub toss_decision: String,
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

/// A delivery may in principle carry several wicket entries; only the first
/// in source order supplies kind/player_out/fielder detail.
fn first_wicket(wickets: &[RawWicket]) -> Option<&RawWicket> {
    wickets.first()
}

/// First credited fielder's name, or empty when the wicket lists none
/// (run outs referred upstairs, bowled, lbw, ...).
fn first_fielder(wicket: &RawWicket) -> String {
    wicket
        .fielders
        .first()
        .and_then(|f| f.name.clone())
        .unwrap_or_default()
}

/// Season labels appear as strings or bare numbers; coerce to text.
fn season_label(season: &Option<serde_json::Value>) -> String {
    match season {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Flatten one raw match record into per-delivery events.
///
/// Pure transform: the caller decides what to do with a `Skip` (log and move
/// on); no partial event list is ever produced for a skipped record.
pub fn flatten_match(
    match_id: &str,
    raw: &RawMatch,
) -> Result<(MatchHeader, Vec<DeliveryEvent>), Skip> {
    let info = match &raw.info {
        Some(i) if !i.is_empty() => i,
        _ => return Err(Skip::MissingInfo),
    };

    if info.teams.len() < 2 {
        return Err(Skip::NotEnoughTeams);
    }

    let header = MatchHeader {
        match_id: match_id.to_string(),
        date: info.dates.first().cloned().unwrap_or_default(),
        season: season_label(&info.season),
        venue: info
            .venue
            .clone()
            .unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
        teams: [info.teams[0].clone(), info.teams[1].clone()],
        toss_decision: info
            .toss
            .as_ref()
            .and_then(|t| t.decision.clone())
            .unwrap_or_default(),
    };

    let mut events = Vec::new();
    for innings in &raw.innings {
        let batting_team = innings.team.clone().unwrap_or_default();
        let bowling_team = if header.teams[1] == batting_team {
            header.teams[0].clone()
        } else {
            header.teams[1].clone()
        };

        for over in &innings.overs {
            for delivery in &over.deliveries {
                events.push(flatten_delivery(
                    &header,
                    &batting_team,
                    &bowling_team,
                    over.over,
                    delivery,
                ));
            }
        }
    }

    Ok((header, events))
}

fn flatten_delivery(
    header: &MatchHeader,
    batting_team: &str,
    bowling_team: &str,
    over: u32,
    delivery: &RawDelivery,
) -> DeliveryEvent {
    let runs = delivery.runs.clone().unwrap_or_default();
    let extras = delivery.extras.clone().unwrap_or_default();

    let (wicket_kind, player_out, fielder) = match first_wicket(&delivery.wickets) {
        Some(w) => (
            w.kind.clone().unwrap_or_default(),
            w.player_out.clone().unwrap_or_default(),
            first_fielder(w),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    DeliveryEvent {
        match_id: header.match_id.clone(),
        date: header.date.clone(),
        season: header.season.clone(),
        venue: header.venue.clone(),
        batting_team: batting_team.to_string(),
        bowling_team: bowling_team.to_string(),
        over,
        batter: delivery.batter.clone().unwrap_or_default(),
        bowler: delivery.bowler.clone().unwrap_or_default(),
        non_striker: delivery.non_striker.clone().unwrap_or_default(),
        runs_batter: runs.batter,
        extras: runs.extras,
        total_runs: runs.total,
        wides: extras.wides,
        noballs: extras.noballs,
        legbyes: extras.legbyes,
        byes: extras.byes,
        wickets: delivery.wickets.len() as u32,
        wicket_kind,
        player_out,
        fielder,
    }
}
