use std::path::Path;

use cricstats::error::Result;
use cricstats::ingest::{load_dir, IngestStats};
use cricstats::query::run_query;
use cricstats::state::EventTable;
use cricstats::types::PlayerReport;

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Years,
    Players,
}

pub struct AppState {
    pub data_dir: String,
    pub stats: IngestStats,
    pub focus: Focus,
    pub years: Vec<i32>,
    pub year_idx: usize,
    pub players: Vec<String>,
    pub player_idx: usize,
    pub report: PlayerReport,
    table: EventTable,
}

impl AppState {
    /// Load the data directory once; all navigation afterwards only
    /// re-derives filtered views of the table.
    pub fn load(data_dir: &str) -> Result<Self> {
        let (table, stats) = load_dir(Path::new(data_dir))?;
        let years = table.available_years();
        let mut app = Self {
            data_dir: data_dir.to_string(),
            stats,
            focus: Focus::Players,
            years,
            year_idx: 0,
            players: Vec::new(),
            player_idx: 0,
            report: PlayerReport::default(),
            table,
        };
        app.refresh_players();
        app.refresh_report();
        Ok(app)
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.years.get(self.year_idx).copied()
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.players.get(self.player_idx).map(String::as_str)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Years => Focus::Players,
            Focus::Players => Focus::Years,
        };
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Years => {
                if self.year_idx + 1 < self.years.len() {
                    self.year_idx += 1;
                    self.refresh_players();
                }
            }
            Focus::Players => {
                if self.player_idx + 1 < self.players.len() {
                    self.player_idx += 1;
                }
            }
        }
        self.refresh_report();
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Years => {
                if self.year_idx > 0 {
                    self.year_idx -= 1;
                    self.refresh_players();
                }
            }
            Focus::Players => {
                self.player_idx = self.player_idx.saturating_sub(1);
            }
        }
        self.refresh_report();
    }

    fn refresh_players(&mut self) {
        self.players = self
            .selected_year()
            .map(|y| self.table.players_in_year(y))
            .unwrap_or_default();
        self.player_idx = 0;
    }

    fn refresh_report(&mut self) {
        self.report = match (self.selected_year(), self.selected_player()) {
            (Some(year), Some(player)) => run_query(&self.table, year, player),
            _ => PlayerReport::default(),
        };
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn format_sr(sr: f64) -> String {
    format!("{sr:.2}")
}
